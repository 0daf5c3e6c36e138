//! JavaScript bundle discovery.
//!
//! The homepage references its built bundle through a `<script src>` pointing
//! under `/assets/`. The bundle path changes with every build, so it is always
//! re-discovered from a fresh homepage fetch.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use reqwest::Client;
use url::Url;

use super::{fetch_page, FetchedPage};
use crate::config::BUNDLE_SRC_PATTERN;
use crate::error_handling::ProbeError;

static BUNDLE_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(BUNDLE_SRC_PATTERN).expect("Failed to compile bundle src regex - this is a bug")
});

/// A fetched JavaScript bundle.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Origin-relative path found in the homepage
    pub path: String,
    /// The bundle response
    pub page: FetchedPage,
}

/// Result of looking for the bundle referenced by the homepage.
#[derive(Debug, Clone)]
pub enum BundleLookup {
    /// The homepage referenced a bundle and it was fetched
    Found(Bundle),
    /// The homepage did not reference any `/assets/*.js` script
    NotFound,
}

/// Extracts the first `/assets/*.js` script path referenced by `html`.
pub fn extract_bundle_path(html: &str) -> Option<&str> {
    BUNDLE_SRC_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Fetches the bundle at `path` relative to `origin`.
///
/// # Errors
///
/// Returns the underlying `ProbeError` if the request fails.
pub async fn fetch_bundle(client: &Client, origin: &Url, path: &str) -> Result<Bundle, ProbeError> {
    let page = fetch_page(client, origin, path).await?;
    Ok(Bundle {
        path: path.to_string(),
        page,
    })
}

/// Fetches the homepage, finds its bundle and fetches that too.
///
/// # Errors
///
/// Returns a `ProbeError` if either the homepage or the bundle request fails.
/// A homepage without a bundle reference is not an error.
pub async fn locate_bundle(client: &Client, origin: &Url) -> Result<BundleLookup, ProbeError> {
    let homepage = fetch_page(client, origin, "/").await?;
    match extract_bundle_path(&homepage.body) {
        Some(path) => {
            debug!("Homepage references bundle {path}");
            Ok(BundleLookup::Found(fetch_bundle(client, origin, path).await?))
        }
        None => {
            debug!("Homepage at {} references no bundle", homepage.url);
            Ok(BundleLookup::NotFound)
        }
    }
}
