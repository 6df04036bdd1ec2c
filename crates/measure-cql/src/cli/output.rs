//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use measure_cql_diagnostics::{Annotation, display_position};
use serde::Serialize;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "json-pretty" => Self::JsonPretty,
            _ => Self::Text,
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Format diagnostic location (file:line:col), 1-based
pub fn format_location(file: &str, annotation: &Annotation) -> String {
    let line = annotation.row.and_then(|row| row.checked_add(1));
    format!(
        "{}:{}:{}",
        file.cyan(),
        display_position(line),
        display_position(annotation.column)
    )
}

/// Format one annotation as a single line
pub fn format_annotation(file: &str, annotation: &Annotation) -> String {
    let severity = match annotation.severity.as_str() {
        "error" => "error".red().bold(),
        "warning" => "warning".yellow().bold(),
        other => other.normal(),
    };
    format!(
        "  {} {}: {}",
        severity,
        format_location(file, annotation),
        annotation.text
    )
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Format a serializable value as JSON
pub fn format_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(row: Option<i64>, column: Option<i64>) -> Annotation {
        Annotation {
            row,
            column,
            severity: "error".to_string(),
            text: "ELM: 1:10 | X".to_string(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("pretty"), OutputFormat::JsonPretty);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("anything"), OutputFormat::Text);
    }

    #[test]
    fn test_format_location_is_one_based() {
        colored::control::set_override(false);
        assert_eq!(
            format_location("m.cql", &annotation(Some(2), Some(1))),
            "m.cql:3:1"
        );
        assert_eq!(format_location("m.cql", &annotation(None, None)), "m.cql:?:?");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&annotation(Some(0), Some(4)), false).unwrap();
        assert_eq!(
            json,
            r#"{"row":0,"column":4,"severity":"error","text":"ELM: 1:10 | X"}"#
        );
    }
}
