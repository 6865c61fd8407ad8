//! Error types for parsing in sensordb-types.

use thiserror::Error;

/// Errors that can occur when parsing sensordb values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The text is not a valid interval such as `[5,10)`.
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Result type alias using sensordb-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
