//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

use crate::config::constants::{
    DEFAULT_ORIGIN, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FORBIDDEN_CSS_MARKER,
    LOCALHOST_API_MARKER, PRODUCTION_API_MARKER, ROOT_DIV_MARKER,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit code policy.
///
/// The probe is a tool for a human reading its output, so by default the
/// process exits 0 no matter how many checks failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the run completes
    Never,
    /// Exit 2 when any check printed a failure marker
    AnyFailure,
}

/// Which diagnostic run to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
pub enum ProbeMode {
    /// Homepage markers, JavaScript bundle wiring and API smoke test
    Detailed,
    /// Why data may not be displayed: API details, frontend HTML, bundle configuration and advice
    Display,
}

/// Whether a homepage marker should be present or absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    /// The marker must appear in the page
    Present,
    /// The marker must not appear in the page
    Absent,
}

/// One substring assertion against the homepage HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerCheck {
    /// Literal substring searched for
    pub pattern: String,
    /// Human label printed next to the outcome
    pub label: String,
    /// Desired polarity
    pub expect: Expect,
}

impl MarkerCheck {
    /// A check that passes when `pattern` is found.
    pub fn present(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
            expect: Expect::Present,
        }
    }

    /// A check that passes when `pattern` is not found.
    pub fn absent(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
            expect: Expect::Absent,
        }
    }
}

/// Builds the homepage check list, with `forbidden` markers expected absent.
///
/// The order is the order the checks are printed in. Forbidden markers take
/// the slot right after the bundle check.
pub fn default_homepage_checks(forbidden: &[String]) -> Vec<MarkerCheck> {
    let mut checks = vec![
        MarkerCheck::present(ROOT_DIV_MARKER, "Root div"),
        MarkerCheck::present("cdn.tailwindcss.com", "Tailwind CDN"),
        MarkerCheck::present("/assets/index-", "Main JS bundle"),
    ];
    checks.extend(forbidden.iter().map(|marker| {
        if marker == FORBIDDEN_CSS_MARKER {
            MarkerCheck::absent(marker, "CSS reference (should NOT exist)")
        } else {
            MarkerCheck::absent(marker, &format!("{marker} reference (should NOT exist)"))
        }
    }));
    checks.push(MarkerCheck::present("react", "React import"));
    checks.push(MarkerCheck::present("HalalGuard", "App title"));
    checks
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Full homepage/bundle/API check
/// halalguard_probe detailed
///
/// # Data display investigation against a staging origin
/// halalguard_probe --origin https://staging.example.com display
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "halalguard_probe",
    about = "Checks that the HalalGuard frontend, JavaScript bundle and API are wired together."
)]
pub struct Opt {
    /// Diagnostic run to perform
    #[command(subcommand)]
    pub mode: ProbeMode,

    /// Origin (scheme and host) all requests target
    #[arg(long, global = true, env = "HALALGUARD_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: Url,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Homepage substring that must NOT appear (repeatable, replaces the default)
    #[arg(
        long = "forbidden-marker",
        global = true,
        default_value = FORBIDDEN_CSS_MARKER,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub forbidden_markers: Vec<String>,

    /// Exit code policy: never|any-failure
    #[arg(long, global = true, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use halalguard_probe::{Config, ProbeMode};
///
/// let config = Config {
///     mode: ProbeMode::Display,
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Diagnostic run to perform
    pub mode: ProbeMode,

    /// Origin all requests target
    pub origin: Url,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Exit code policy
    pub fail_on: FailOn,

    /// Homepage substring checks, in print order
    pub homepage_checks: Vec<MarkerCheck>,

    /// Substring proving the bundle targets the production API
    pub production_api_marker: String,

    /// Substring revealing a bundle pointed at a local API
    pub localhost_api_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Detailed,
            origin: Url::parse(DEFAULT_ORIGIN).expect("DEFAULT_ORIGIN must parse - this is a bug"),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            fail_on: FailOn::Never,
            homepage_checks: default_homepage_checks(&[FORBIDDEN_CSS_MARKER.to_string()]),
            production_api_marker: PRODUCTION_API_MARKER.to_string(),
            localhost_api_marker: LOCALHOST_API_MARKER.to_string(),
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            mode: opt.mode,
            origin: opt.origin,
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
            fail_on: opt.fail_on,
            homepage_checks: default_homepage_checks(&opt.forbidden_markers),
            ..Default::default()
        }
    }
}
