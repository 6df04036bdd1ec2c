//! CQL measure diagnostics
//!
//! This crate checks the CQL of a quality measure the way the measure editor
//! needs it checked:
//! - Translating CQL to ELM through a pluggable translator
//! - Validating every referenced valueset against a terminology service
//! - Turning translator and valueset errors into editor annotations and markers
//! - Resolving definition and function argument types from ELM
//!
//! # Example
//!
//! ```ignore
//! use measure_cql::{CqlChecker, ElmFileTranslator, NoOpValueSetResolver};
//! use std::sync::Arc;
//!
//! let checker = CqlChecker::new(
//!     Arc::new(ElmFileTranslator::new("measure.json")),
//!     Arc::new(NoOpValueSetResolver),
//! );
//! let outcome = checker.check_cql("library Measure version '0.0.000'", None).await;
//! ```

// Re-export all public APIs from internal crates
pub use measure_cql_diagnostics as diagnostics;
pub use measure_cql_elm as elm;

pub mod check;
pub mod config;
pub mod terminology;
pub mod translator;
pub mod valueset;

#[cfg(feature = "http")]
pub mod http;

// Convenience re-exports
pub use check::{CheckOutcome, CheckStatus, CqlChecker, check_cql};
pub use config::ServiceConfig;
pub use measure_cql_diagnostics::{
    Annotation, EditorDiagnostics, ElmError, Marker, SourceRange, build_diagnostics,
    parse_locator,
};
pub use measure_cql_elm::{
    ElmDocument, TypeMap, resolve_definition_types, resolve_function_argument_types,
};
pub use terminology::{NoOpValueSetResolver, TerminologyError, ValueSetResolver};
pub use translator::{CqlTranslator, ElmFileTranslator, TranslationError};
pub use valueset::{extract_oid, validate_valuesets};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
