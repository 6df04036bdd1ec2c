//! Editor-facing diagnostics: gutter annotations and underline markers

use crate::{ElmError, char_position, display_position, line_position};
use serde::{Deserialize, Serialize};

/// Style class of the inline underline drawn for every diagnostic
pub const ERROR_UNDERLINE_CLASS: &str = "editor-error-underline";

/// Marker kind understood by the editor
pub const MARKER_KIND: &str = "text";

/// A 0-based row / column position in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: Option<i64>,
    pub column: Option<i64>,
}

impl Position {
    pub const fn new(row: Option<i64>, column: Option<i64>) -> Self {
        Self { row, column }
    }
}

/// Start and end of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MarkerRange {
    pub start: Position,
    pub end: Position,
}

/// A gutter annotation, one per diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// 0-based row (`startLine - 1`)
    pub row: Option<i64>,
    pub column: Option<i64>,
    /// Lowercased translator severity
    pub severity: String,
    pub text: String,
}

impl From<&ElmError> for Annotation {
    fn from(error: &ElmError) -> Self {
        Self {
            row: to_row(error.start_line),
            column: to_column(error.start_char),
            severity: error.error_severity.to_lowercase(),
            text: format!(
                "ELM: {}:{} | {}",
                display_position(to_column(error.start_char)),
                display_position(to_column(error.end_char)),
                error.message
            ),
        }
    }
}

/// An inline underline marker, one per diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub range: MarkerRange,
    pub style_class: String,
    pub kind: String,
}

impl From<&ElmError> for Marker {
    fn from(error: &ElmError) -> Self {
        Self {
            range: MarkerRange {
                start: Position::new(to_row(error.start_line), to_column(error.start_char)),
                end: Position::new(to_row(error.end_line), to_column(error.end_char)),
            },
            style_class: ERROR_UNDERLINE_CLASS.to_string(),
            kind: MARKER_KIND.to_string(),
        }
    }
}

/// Annotations and markers for one set of errors.
///
/// Both lists hold exactly one entry per error and are index-aligned with
/// the concatenated error list they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorDiagnostics {
    pub annotations: Vec<Annotation>,
    pub markers: Vec<Marker>,
}

/// Merge translator errors with valueset errors and project them for the editor.
///
/// Translator errors come first in their reported order, followed by the
/// valueset errors in their own order.
pub fn build_diagnostics(
    translator_errors: &[ElmError],
    valueset_errors: &[ElmError],
) -> EditorDiagnostics {
    let errors = || translator_errors.iter().chain(valueset_errors);

    EditorDiagnostics {
        annotations: errors().map(Annotation::from).collect(),
        markers: errors().map(Marker::from).collect(),
    }
}

/// 0-based editor row; lines below 1 are unknown
fn to_row(line: Option<i64>) -> Option<i64> {
    line.and_then(line_position).map(|line| line - 1)
}

fn to_column(column: Option<i64>) -> Option<i64> {
    column.and_then(char_position)
}
