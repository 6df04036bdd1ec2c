//! Errors raised while reading ELM JSON

use thiserror::Error;

/// Result type for ELM operations
pub type Result<T> = std::result::Result<T, ElmParseError>;

/// Errors that can occur while reading or writing an ELM document
#[derive(Debug, Error)]
pub enum ElmParseError {
    /// The input is not a JSON document of the expected shape
    #[error("Invalid ELM JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The document could not be written back out
    #[error("Failed to serialize ELM: {0}")]
    Serialize(#[source] serde_json::Error),
}
