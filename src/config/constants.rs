//! Configuration constants.
//!
//! This module defines the defaults for every probe: the target origin, the
//! paths requested from it, timeouts, and the literal markers searched for in
//! the homepage and the JavaScript bundle.

/// Origin every request targets unless `--origin` overrides it.
pub const DEFAULT_ORIGIN: &str = "https://halal-guard.centonk.my.id";

/// Path of the transactions API, relative to the origin.
pub const API_TRANSACTIONS_PATH: &str = "/api/transactions";

/// Default User-Agent string for HTTP requests.
///
/// The homepage request of the detailed run has always been sent with this
/// browser-like string. Users can override it via the `--user-agent` flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// Network operation timeouts
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Bundle discovery
/// Pattern locating the first built script referenced by the homepage.
/// Capture group 1 is the origin-relative path.
pub const BUNDLE_SRC_PATTERN: &str = r#"src="(/assets/[^"]+\.js)""#;

// Bundle wiring markers
/// Substring proving the bundle was built against the production API.
pub const PRODUCTION_API_MARKER: &str = "halal-guard.centonk.my.id/api";
/// Substring revealing a development build pointed at a local API.
pub const LOCALHOST_API_MARKER: &str = "localhost:8087";
/// Markers indicating the bundle contains the transaction fetching code.
pub const TRANSACTION_FETCH_MARKERS: &[&str] = &["getAllTransactions", "transactions"];
/// Marker indicating data is loaded on component mount.
pub const USE_EFFECT_MARKER: &str = "useEffect";

// Homepage markers
/// Root container the frontend mounts into.
pub const ROOT_DIV_MARKER: &str = r#"<div id="root">"#;
/// Stylesheet a correct build must not reference.
pub const FORBIDDEN_CSS_MARKER: &str = "index.css";

// Output limits
/// Number of characters of homepage HTML echoed by the detailed run.
pub const HTML_PREVIEW_CHARS: usize = 1000;
/// Width of the banner rule printed by the detailed run.
pub const DETAILED_BANNER_WIDTH: usize = 70;
/// Width of the banner rule printed by the display run.
pub const DISPLAY_BANNER_WIDTH: usize = 80;

/// Currency prefix used when printing transaction amounts.
pub const CURRENCY_PREFIX: &str = "Rp";
