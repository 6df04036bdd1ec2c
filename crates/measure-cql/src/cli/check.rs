//! Check command implementation

use super::output::{self, OutputFormat};
use crate::check::{CheckOutcome, CheckStatus, CqlChecker};
use crate::config::ServiceConfig;
use crate::http::{HttpTranslator, HttpValueSetResolver};
use crate::terminology::{NoOpValueSetResolver, ValueSetResolver};
use crate::translator::{CqlTranslator, ElmFileTranslator};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for check command
pub struct CheckConfig {
    pub file: PathBuf,
    /// Pre-translated ELM to use instead of the translation service
    pub elm: Option<PathBuf>,
    pub service: ServiceConfig,
    pub credential: Option<String>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Check a CQL file and report its diagnostics.
///
/// Returns whether the file is free of errors.
pub async fn check(config: CheckConfig) -> Result<bool> {
    let cql = fs::read_to_string(&config.file)
        .with_context(|| format!("Failed to read CQL file: {}", config.file.display()))?;

    let checker = CqlChecker::new(translator(&config)?, resolver(&config)?);
    // A credential is only meaningful alongside a terminology service.
    let credential = config
        .credential
        .as_deref()
        .filter(|_| config.service.terminology_url.is_some());

    info!("Checking {}", config.file.display());
    let outcome = checker.check_cql(&cql, credential).await;

    let content = match config.format {
        OutputFormat::Json => output::format_json(&outcome, false)?,
        OutputFormat::JsonPretty => output::format_json(&outcome, true)?,
        OutputFormat::Text => render_text(&config, &outcome),
    };
    output::write_output(&content, config.output_file.as_deref())?;

    Ok(outcome.status != CheckStatus::Failed && !outcome.has_errors())
}

fn translator(config: &CheckConfig) -> Result<Arc<dyn CqlTranslator>> {
    if let Some(elm) = &config.elm {
        return Ok(Arc::new(ElmFileTranslator::new(elm)));
    }
    if config.service.translator_url.is_none() {
        bail!("Either --elm or --translator-url is required");
    }
    let translator = HttpTranslator::new(&config.service)?;
    Ok(Arc::new(translator))
}

fn resolver(config: &CheckConfig) -> Result<Arc<dyn ValueSetResolver>> {
    if config.service.terminology_url.is_none() {
        return Ok(Arc::new(NoOpValueSetResolver));
    }
    let resolver = HttpValueSetResolver::new(&config.service)?;
    Ok(Arc::new(resolver))
}

fn render_text(config: &CheckConfig, outcome: &CheckOutcome) -> String {
    let file = config.file.display().to_string();
    let mut lines = Vec::new();

    let status = match outcome.status {
        CheckStatus::Done if !outcome.has_errors() => "✓".green().bold(),
        CheckStatus::Empty => "-".normal(),
        _ => "✗".red().bold(),
    };
    lines.push(format!("{} {}", status, file.cyan()));

    for annotation in &outcome.annotations {
        lines.push(output::format_annotation(&file, annotation));
    }

    if let Some(message) = &outcome.message {
        let message = match outcome.status {
            CheckStatus::Failed => format!("{}", message.red()),
            _ if outcome.credential_cleared => output::format_warning(message),
            _ => message.to_string(),
        };
        lines.push(message);
    }

    if outcome.status == CheckStatus::Done {
        lines.push(format!("{} diagnostic(s)", outcome.annotations.len()));
    }

    lines.join("\n")
}
