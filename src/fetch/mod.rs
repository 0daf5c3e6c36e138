//! Fetching probed resources.
//!
//! Every request is a plain GET against a path on the configured origin. The
//! body is always read as text; callers decide whether to search it or decode
//! it as JSON.

mod bundle;

pub use bundle::{extract_bundle_path, fetch_bundle, locate_bundle, Bundle, BundleLookup};

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::error_handling::ProbeError;

/// A successfully fetched resource.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Absolute URL that was requested
    pub url: Url,
    /// HTTP status code (always 2xx)
    pub status: u16,
    /// `Content-Type` header, if the server sent one
    pub content_type: Option<String>,
    /// Decoded response body
    pub body: String,
}

impl FetchedPage {
    /// Body length in bytes.
    pub fn byte_len(&self) -> usize {
        self.body.len()
    }
}

/// Resolves an origin-relative `path` against `origin`.
///
/// # Errors
///
/// Returns `ProbeError::InvalidUrl` if the joined URL does not parse.
pub fn resolve(origin: &Url, path: &str) -> Result<Url, ProbeError> {
    origin.join(path).map_err(|source| ProbeError::InvalidUrl {
        path: path.to_string(),
        source,
    })
}

/// Fetches `path` from `origin` and returns its body as text.
///
/// Non-2xx responses are treated as failures, the same as connection errors
/// and timeouts.
///
/// # Errors
///
/// Returns `ProbeError::Request` on connection failure, timeout, error status
/// or body read failure, and `ProbeError::InvalidUrl` if `path` cannot be
/// joined to `origin`.
pub async fn fetch_page(client: &Client, origin: &Url, path: &str) -> Result<FetchedPage, ProbeError> {
    let url = resolve(origin, path)?;
    debug!("GET {url}");

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(ProbeError::from)
        .inspect_err(|e| {
            if e.is_timeout() {
                warn!("Request to {url} timed out");
            }
        })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await?;

    debug!("{url} answered {status} with {} bytes", body.len());
    Ok(FetchedPage {
        url,
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests;
