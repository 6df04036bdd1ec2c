//! Result-type resolution for CQL definitions and functions
//!
//! Produces the name → type symbol tables the measure UI uses to check
//! population criteria against the CQL: which definitions return which type,
//! and which single argument type each function takes.

use crate::error::Result;
use crate::model::{ElmDefinition, ElmDocument, NAMED_TYPE_SPECIFIER, OperandDef};
use crate::naming::camel_case;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Ordered mapping of camel-cased definition name to resolved type name
pub type TypeMap = IndexMap<String, String>;

/// Type recorded for a definition whose result type cannot be determined
pub const UNRESOLVED_DEFINITION_TYPE: &str = "NA";

/// Type recorded for a function whose argument type is not a usable basis
pub const UNRESOLVED_FUNCTION_TYPE: &str = "N/A";

/// Type recorded for a function without operands
pub const NO_OPERAND_FUNCTION_TYPE: &str = "Boolean";

/// Strip the `{namespace}` prefix from an ELM type name.
///
/// Returns the text after the last `}`, or `None` when the name carries no
/// namespace at all.
pub fn strip_namespace(type_name: &str) -> Option<&str> {
    type_name.rsplit_once('}').map(|(_, name)| name)
}

/// Resolve the result type of every definition in an ELM JSON document.
///
/// `None` or blank input yields an empty map, as does a document without
/// `library.statements.def`. Input that is not JSON is an error.
pub fn resolve_definition_types(elm_json: Option<&str>) -> Result<TypeMap> {
    Ok(parse_document(elm_json)?
        .map(|document| definition_types(&document))
        .unwrap_or_default())
}

/// Resolve the argument type of every function in an ELM JSON document.
///
/// Guard clauses are the same as [`resolve_definition_types`].
pub fn resolve_function_argument_types(elm_json: Option<&str>) -> Result<TypeMap> {
    Ok(parse_document(elm_json)?
        .map(|document| function_argument_types(&document))
        .unwrap_or_default())
}

fn parse_document(elm_json: Option<&str>) -> Result<Option<ElmDocument>> {
    match elm_json {
        Some(json) if !json.trim().is_empty() => ElmDocument::from_json(json).map(Some),
        _ => Ok(None),
    }
}

/// Resolve the result type of every definition in a parsed document.
///
/// Definitions whose names collide after camel-casing overwrite each other;
/// the last one in document order wins.
pub fn definition_types(document: &ElmDocument) -> TypeMap {
    collect_types(document.definitions().iter(), definition_type)
}

/// Resolve the argument type of every function in a parsed document.
///
/// Name collisions follow the same last-wins rule as [`definition_types`].
pub fn function_argument_types(document: &ElmDocument) -> TypeMap {
    collect_types(document.functions(), function_argument_type)
}

fn collect_types<'a>(
    definitions: impl Iterator<Item = &'a ElmDefinition>,
    resolve: fn(&ElmDefinition) -> String,
) -> TypeMap {
    let mut types = TypeMap::new();
    for definition in definitions {
        let key = camel_case(definition.trimmed_name());
        let resolved = resolve(definition);
        if let Some(previous) = types.insert(key.clone(), resolved) {
            debug!("definition key '{key}' redefined, replacing type '{previous}'");
        }
    }
    types
}

/// Resolve the result type of one definition.
///
/// `resultTypeName` wins over `resultTypeSpecifier`; inside the specifier the
/// first entry, in document order, that is a `NamedTypeSpecifier` is used.
/// Anything unresolvable or empty becomes [`UNRESOLVED_DEFINITION_TYPE`].
pub fn definition_type(definition: &ElmDefinition) -> String {
    let resolved = if let Some(type_name) = non_empty(definition.result_type_name.as_deref()) {
        strip_namespace(type_name)
    } else if let Some(specifier) = &definition.result_type_specifier {
        specifier
            .values()
            .find(|value| is_named_type_specifier(value))
            .and_then(|value| value.get("name"))
            .and_then(Value::as_str)
            .and_then(strip_namespace)
    } else {
        None
    };

    non_empty(resolved)
        .unwrap_or(UNRESOLVED_DEFINITION_TYPE)
        .to_string()
}

/// Resolve the argument type of one function.
///
/// | operands                     | result                     |
/// |------------------------------|----------------------------|
/// | none                         | `Boolean`                  |
/// | one, named, not boolean      | the operand's type name    |
/// | one boolean, or not named    | `N/A`                      |
/// | two or more                  | `N/A`                      |
///
/// List and interval operands map to `N/A`: there is no population basis
/// they could match.
pub fn function_argument_type(definition: &ElmDefinition) -> String {
    match definition.operands() {
        [] => NO_OPERAND_FUNCTION_TYPE.to_string(),
        [operand] => single_operand_type(operand)
            .unwrap_or(UNRESOLVED_FUNCTION_TYPE)
            .to_string(),
        _ => UNRESOLVED_FUNCTION_TYPE.to_string(),
    }
}

fn single_operand_type(operand: &OperandDef) -> Option<&str> {
    let specifier = operand.operand_type_specifier.as_ref()?;
    let type_name = specifier.name.as_deref().and_then(strip_namespace);

    if camel_case(type_name.unwrap_or_default()) == "boolean" || !specifier.is_named() {
        return None;
    }
    non_empty(type_name)
}

fn is_named_type_specifier(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(NAMED_TYPE_SPECIFIER)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
