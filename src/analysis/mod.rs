//! Content checks.
//!
//! Pure functions over already-fetched text. Nothing here performs I/O, so
//! every check can be exercised against fixture strings.

mod bundle;
mod markers;
mod transactions;

pub use bundle::{classify_api_wiring, count_occurrences, inspect_bundle, ApiWiring, BundleFindings};
pub use markers::{evaluate_markers, page_title, preview, MarkerOutcome};
pub use transactions::{format_amount, parse_transactions, value_text, Analysis, Transaction};
