//! Types and locator command implementations

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use measure_cql_diagnostics::parse_locator;
use measure_cql_elm::{ElmDocument, TypeMap, definition_types, function_argument_types};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for types command
pub struct TypesConfig {
    pub file: PathBuf,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Resolved types of one ELM document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTypes {
    pub definitions: TypeMap,
    pub function_arguments: TypeMap,
}

impl ResolvedTypes {
    pub fn from_document(document: &ElmDocument) -> Self {
        Self {
            definitions: definition_types(document),
            function_arguments: function_argument_types(document),
        }
    }
}

/// Print the definition and function argument types of an ELM file
pub fn types(config: TypesConfig) -> Result<()> {
    let json = fs::read_to_string(&config.file)
        .with_context(|| format!("Failed to read ELM file: {}", config.file.display()))?;
    let document = ElmDocument::from_json(&json)
        .with_context(|| format!("Failed to parse ELM file: {}", config.file.display()))?;

    let resolved = ResolvedTypes::from_document(&document);
    let content = output::format_json(&resolved, config.format != OutputFormat::Json)?;
    output::write_output(&content, config.output_file.as_deref())
}

/// Print the parsed form of a locator
pub fn locator(locator: &str, format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    let range = parse_locator(locator);
    let content = match format {
        OutputFormat::Text => format!(
            "{} ({})",
            range,
            if range.is_known() { "known" } else { "incomplete" }
        ),
        OutputFormat::Json => output::format_json(&range, false)?,
        OutputFormat::JsonPretty => output::format_json(&range, true)?,
    };
    output::write_output(&content, output_file)
}
