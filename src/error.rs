//! Error types for u-shift.
//!
//! The search itself never fails once a run has started: every failure mode
//! is either a configuration problem caught by validation, or malformed
//! roster text caught by the loaders.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A configuration parameter is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Roster text could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}
