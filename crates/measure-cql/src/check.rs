//! The "check CQL" request
//!
//! One request moves through these phases:
//!
//! ```text
//! Idle ──blank CQL──────────────────────────────────────────▶ Empty
//!   │
//!   ▼
//! Translating ──translator error───────────────────────────▶ Failed
//!   │
//!   ▼
//! ResolvingValuesets ─▶ Aggregating ─────────────────────────▶ Done
//! ```
//!
//! `Empty`, `Failed` and `Done` are terminal; a new CQL change starts a new
//! request. Nothing escapes a request as an error: the caller always gets a
//! [`CheckOutcome`].

use crate::terminology::ValueSetResolver;
use crate::translator::CqlTranslator;
use crate::valueset::validate_valuesets;
use log::{debug, warn};
use measure_cql_diagnostics::{Annotation, Marker, build_diagnostics};
use measure_cql_elm::ElmDocument;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Message reported when the translator fails
pub const TRANSLATION_FAILED_MESSAGE: &str = "Unable to translate CQL to ELM!";

/// Message reported when every valueset validated
pub const VALUE_SETS_VALID_MESSAGE: &str = "Value Set is valid!";

/// Message reported when no terminology credential is available
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to UMLS!";

/// Terminal state of a check request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// No CQL to check
    Empty,
    /// Translation failed
    Failed,
    /// Translation succeeded; diagnostics are available
    Done,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Empty => write!(f, "empty"),
            CheckStatus::Failed => write!(f, "failed"),
            CheckStatus::Done => write!(f, "done"),
        }
    }
}

/// Result of one check request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub status: CheckStatus,
    /// Translated library, with valueset errors appended to `externalErrors`
    pub elm: Option<ElmDocument>,
    pub annotations: Vec<Annotation>,
    pub markers: Vec<Marker>,
    /// User-facing status message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set when the caller should discard its cached terminology credential
    pub credential_cleared: bool,
}

impl CheckOutcome {
    fn empty() -> Self {
        Self {
            status: CheckStatus::Empty,
            elm: None,
            annotations: Vec::new(),
            markers: Vec::new(),
            message: None,
            credential_cleared: false,
        }
    }

    fn failed() -> Self {
        Self {
            status: CheckStatus::Failed,
            message: Some(TRANSLATION_FAILED_MESSAGE.to_string()),
            ..Self::empty()
        }
    }

    /// Check whether any diagnostic has error severity
    pub fn has_errors(&self) -> bool {
        self.annotations.iter().any(|annotation| annotation.severity == "error")
    }
}

/// Checks CQL against a translator and a terminology service
pub struct CqlChecker {
    translator: Arc<dyn CqlTranslator>,
    resolver: Arc<dyn ValueSetResolver>,
}

impl CqlChecker {
    pub fn new(translator: Arc<dyn CqlTranslator>, resolver: Arc<dyn ValueSetResolver>) -> Self {
        Self {
            translator,
            resolver,
        }
    }

    /// Run one check request. See [`check_cql`].
    pub async fn check_cql(&self, cql: &str, credential: Option<&str>) -> CheckOutcome {
        check_cql(self.translator.as_ref(), self.resolver.as_ref(), cql, credential).await
    }
}

/// Translate `cql`, validate its valuesets and build editor diagnostics.
///
/// Valuesets are validated only when the library declares a valueset
/// collection and `credential` is non-empty. Without a credential the outcome
/// asks the user to log in and tells the caller to drop its cached
/// credential.
pub async fn check_cql(
    translator: &dyn CqlTranslator,
    resolver: &dyn ValueSetResolver,
    cql: &str,
    credential: Option<&str>,
) -> CheckOutcome {
    if cql.trim().is_empty() {
        debug!("check_cql: no CQL, clearing diagnostics");
        return CheckOutcome::empty();
    }

    debug!("check_cql: translating {} bytes of CQL", cql.len());
    let mut elm = match translator.translate(cql).await {
        Ok(elm) => elm,
        Err(err) => {
            warn!("check_cql: translation failed: {err}");
            return CheckOutcome::failed();
        }
    };

    let credential = credential.filter(|credential| !credential.is_empty());
    let mut message = None;
    let mut credential_cleared = false;

    let valueset_errors = match (elm.value_set_refs(), credential) {
        (Some(refs), Some(credential)) => {
            let errors = validate_valuesets(resolver, refs, Some(credential)).await;
            if errors.is_empty() {
                message = Some(VALUE_SETS_VALID_MESSAGE.to_string());
            }
            errors
        }
        (_, None) => {
            debug!("check_cql: no terminology credential, skipping valuesets");
            message = Some(LOGIN_REQUIRED_MESSAGE.to_string());
            credential_cleared = true;
            Vec::new()
        }
        (None, Some(_)) => Vec::new(),
    };

    let diagnostics = build_diagnostics(elm.error_exceptions(), &valueset_errors);
    debug!(
        "check_cql: {} translator error(s), {} valueset error(s)",
        elm.error_exceptions().len(),
        valueset_errors.len()
    );
    elm.push_external_errors(&valueset_errors);

    CheckOutcome {
        status: CheckStatus::Done,
        elm: Some(elm),
        annotations: diagnostics.annotations,
        markers: diagnostics.markers,
        message,
        credential_cleared,
    }
}
