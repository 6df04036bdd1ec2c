//! ELM document structures
//!
//! The translator output is only partially specified: libraries may lack
//! statements, statements may lack definitions, definitions may lack type
//! information. Every nested field is therefore optional, and accessors
//! collapse absence to an empty result instead of failing. Keys that are not
//! interpreted here are kept in `other` so a document survives a
//! deserialize / serialize pass without losing content.

use crate::error::{ElmParseError, Result};
use indexmap::IndexMap;
use measure_cql_diagnostics::ElmError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `type` discriminator of function definitions
pub const FUNCTION_DEF: &str = "FunctionDef";

/// `type` discriminator of named type specifiers
pub const NAMED_TYPE_SPECIFIER: &str = "NamedTypeSpecifier";

// ============================================================================
// Document
// ============================================================================

/// Root of a translated library
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmDocument {
    /// Errors reported by the translator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_exceptions: Option<Vec<ElmError>>,
    /// Errors contributed by other validators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_errors: Option<Vec<Value>>,
    /// The translated library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<ElmLibrary>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ElmDocument {
    /// Parse an ELM document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ElmParseError::InvalidJson)
    }

    /// Write the document back to JSON text
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ElmParseError::Serialize)
    }

    /// Statement definitions (`library.statements.def`), empty when absent
    pub fn definitions(&self) -> &[ElmDefinition] {
        self.library
            .as_ref()
            .and_then(|library| library.statements.as_ref())
            .and_then(|statements| statements.defs.as_deref())
            .unwrap_or_default()
    }

    /// Function definitions only
    pub fn functions(&self) -> impl Iterator<Item = &ElmDefinition> {
        self.definitions().iter().filter(|def| def.is_function())
    }

    /// Valueset references (`library.valueSets.def`), `None` when the
    /// collection itself is absent
    pub fn value_set_refs(&self) -> Option<&[ElmValueSetRef]> {
        self.library
            .as_ref()
            .and_then(|library| library.value_sets.as_ref())
            .and_then(|value_sets| value_sets.defs.as_deref())
    }

    /// Translator-reported errors, empty when absent
    pub fn error_exceptions(&self) -> &[ElmError] {
        self.error_exceptions.as_deref().unwrap_or_default()
    }

    /// Errors contributed by other validators, empty when absent
    pub fn external_errors(&self) -> &[Value] {
        self.external_errors.as_deref().unwrap_or_default()
    }

    /// Append error records to `externalErrors`
    pub fn push_external_errors(&mut self, errors: &[ElmError]) {
        if errors.is_empty() {
            return;
        }
        let external = self.external_errors.get_or_insert_with(Vec::new);
        external.extend(errors.iter().filter_map(|error| serde_json::to_value(error).ok()));
    }

    /// Library identifier, when the translator reported one
    pub fn identifier(&self) -> Option<&VersionedIdentifier> {
        self.library.as_ref()?.identifier.as_ref()
    }
}

// ============================================================================
// Library Structure
// ============================================================================

/// ELM library
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmLibrary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<VersionedIdentifier>,
    /// Expression and function definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<Statements>,
    /// Valueset definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_sets: Option<ValueSetDefs>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Versioned identifier for libraries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VersionedIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Container for statements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statements {
    #[serde(rename = "def", skip_serializing_if = "Option::is_none")]
    pub defs: Option<Vec<ElmDefinition>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Container for valueset definitions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueSetDefs {
    #[serde(rename = "def", skip_serializing_if = "Option::is_none")]
    pub defs: Option<Vec<ElmValueSetRef>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

// ============================================================================
// Definitions
// ============================================================================

/// One CQL `define` or function
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmDefinition {
    /// Name as written in CQL, possibly with stray whitespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Discriminator (`ExpressionDef`, `FunctionDef`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Namespaced result type, e.g. `{urn:hl7-org:elm-types:r1}Boolean`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type_name: Option<String>,
    /// Result type specifier, kept in document key order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type_specifier: Option<IndexMap<String, Value>>,
    /// Function operands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operand: Option<Vec<OperandDef>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ElmDefinition {
    /// Check whether this is a function definition
    pub fn is_function(&self) -> bool {
        self.kind.as_deref() == Some(FUNCTION_DEF)
    }

    /// Operands, empty when absent
    pub fn operands(&self) -> &[OperandDef] {
        self.operand.as_deref().unwrap_or_default()
    }

    /// Name with surrounding whitespace removed, empty when absent
    pub fn trimmed_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// Function operand
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperandDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operand_type_specifier: Option<TypeSpecifier>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Type specifier.
///
/// Only named specifiers carry a `name`; list, interval, tuple and choice
/// specifiers keep their nested structure in `other`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeSpecifier {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TypeSpecifier {
    /// Create a named type specifier
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: Some(NAMED_TYPE_SPECIFIER.to_string()),
            name: Some(name.into()),
            other: Map::new(),
        }
    }

    /// Check whether this is a `NamedTypeSpecifier`
    pub fn is_named(&self) -> bool {
        self.kind.as_deref() == Some(NAMED_TYPE_SPECIFIER)
    }
}

/// Valueset definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmValueSetRef {
    /// Valueset URI; contains the OID
    #[serde(default)]
    pub id: String,
    /// Source range of the `valueset` declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ElmValueSetRef {
    pub fn new(id: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: Some(locator.into()),
            ..Self::default()
        }
    }

    /// Locator text, empty when absent
    pub fn locator(&self) -> &str {
        self.locator.as_deref().unwrap_or_default()
    }
}
