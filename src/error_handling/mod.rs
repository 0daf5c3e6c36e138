//! Error handling.
//!
//! This module provides the typed errors raised by initialization and by the
//! fetch/decode layer. Steps wrap them with `anyhow` context; the runner prints
//! every failure the same way and moves on to the next step.

mod types;

// Re-export public API
pub use types::{InitializationError, ProbeError};
