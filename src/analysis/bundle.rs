//! Checks against the JavaScript bundle text.

use crate::config::{TRANSACTION_FETCH_MARKERS, USE_EFFECT_MARKER};

/// Which API the bundle was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiWiring {
    /// The production API marker is present
    Production,
    /// No production marker, but the localhost marker is present
    Localhost,
    /// Neither marker is present
    Unknown,
}

/// Everything the display run reports about a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleFindings {
    /// Non-overlapping occurrences of the production API marker
    pub production_refs: usize,
    /// Whether the localhost API marker occurs
    pub localhost_ref: bool,
    /// Whether transaction fetching code is present
    pub transaction_code: bool,
    /// Whether data loading on mount is present
    pub use_effect: bool,
}

/// Counts non-overlapping occurrences of `needle`. An empty needle counts as zero.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Classifies the API the bundle targets. The production marker wins when both occur.
pub fn classify_api_wiring(js: &str, production_marker: &str, localhost_marker: &str) -> ApiWiring {
    if js.contains(production_marker) {
        ApiWiring::Production
    } else if js.contains(localhost_marker) {
        ApiWiring::Localhost
    } else {
        ApiWiring::Unknown
    }
}

/// Runs the display run's bundle checks.
pub fn inspect_bundle(js: &str, production_marker: &str, localhost_marker: &str) -> BundleFindings {
    BundleFindings {
        production_refs: count_occurrences(js, production_marker),
        localhost_ref: js.contains(localhost_marker),
        transaction_code: TRANSACTION_FETCH_MARKERS.iter().any(|m| js.contains(m)),
        use_effect: js.contains(USE_EFFECT_MARKER),
    }
}
