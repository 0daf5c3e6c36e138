//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while fetching or decoding a probed resource.
///
/// The console output does not distinguish between these; every variant is
/// printed as the same failure line. The variants exist so callers and tests
/// can tell what went wrong.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Connection failure, timeout, non-2xx status or body read failure.
    #[error(transparent)]
    Request(#[from] ReqwestError),

    /// A path could not be resolved against the origin.
    #[error("invalid URL for {path}: {source}")]
    InvalidUrl {
        /// Path that was being joined
        path: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The response body was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The API answered with JSON that is not an array.
    #[error("expected a JSON array of transactions, got {0}")]
    NotAnArray(&'static str),

    /// A transaction lacked a field the report needs.
    #[error("transaction is missing field '{0}'")]
    MissingField(&'static str),

    /// A transaction amount was not a JSON number.
    #[error("transaction amount is not a number: {0}")]
    InvalidAmount(String),
}

impl ProbeError {
    /// Returns true when the underlying request hit its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Request(e) if e.is_timeout())
    }
}
