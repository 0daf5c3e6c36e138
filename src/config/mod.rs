//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (origin, paths, timeouts, markers)
//! - CLI option types and parsing
//! - The library `Config` the probe runs from

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    default_homepage_checks, Config, Expect, FailOn, LogFormat, LogLevel, MarkerCheck, Opt,
    ProbeMode,
};
