//! Translator error records

use crate::SourceRange;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Severity attached to synthetic valueset errors
pub const VALUE_SET_ERROR_SEVERITY: &str = "Error";

/// Error type attached to synthetic valueset errors
pub const VALUE_SET_ERROR_TYPE: &str = "ValueSet";

/// An error record in the shape the CQL-to-ELM translator reports it
/// (`errorExceptions` entries).
///
/// Positions follow the translator convention: 1-based lines, 0-based
/// characters. Unknown positions are `None`. Keys this crate does not
/// interpret are kept in `other` so the record re-serializes unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_char: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_char: Option<i64>,
    #[serde(default)]
    pub error_severity: String,
    #[serde(default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_include_library_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_include_library_version_id: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ElmError {
    /// Create a new error record without a position
    pub fn new(
        error_severity: impl Into<String>,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_severity: error_severity.into(),
            error_type: error_type.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Create the record for a valueset that failed terminology validation
    pub fn value_set(message: impl Into<String>, range: SourceRange) -> Self {
        Self::new(VALUE_SET_ERROR_SEVERITY, VALUE_SET_ERROR_TYPE, message).with_range(range)
    }

    /// Set the source range
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.start_line = range.start_line;
        self.start_char = range.start_char;
        self.end_line = range.end_line;
        self.end_char = range.end_char;
        self
    }

    /// Get the source range
    pub const fn range(&self) -> SourceRange {
        SourceRange {
            start_line: self.start_line,
            start_char: self.start_char,
            end_line: self.end_line,
            end_char: self.end_char,
        }
    }
}

impl fmt::Display for ElmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} at {}",
            self.error_severity.to_lowercase(),
            self.error_type,
            self.message,
            self.range()
        )
    }
}
