//! ELM document builders

use measure_cql::ElmDocument;
use measure_cql::elm::ElmValueSetRef;
use serde_json::{Value, json};

/// A valueset reference for `urn:oid:{oid}` declared at `locator`
pub fn value_set(oid: &str, locator: &str) -> Value {
    json!({
        "localId": "1",
        "locator": locator,
        "name": format!("Valueset {oid}"),
        "id": format!("urn:oid:{oid}"),
        "accessLevel": "Public"
    })
}

/// Parsed valueset references
pub fn value_set_refs(refs: &[Value]) -> Vec<ElmValueSetRef> {
    serde_json::from_value(Value::Array(refs.to_vec())).unwrap()
}

/// A translator error record
pub fn translator_error(locator: [i64; 4], severity: &str, message: &str) -> Value {
    json!({
        "startLine": locator[0],
        "startChar": locator[1],
        "endLine": locator[2],
        "endChar": locator[3],
        "message": message,
        "errorType": "semantic",
        "errorSeverity": severity,
        "type": "CqlToElmError"
    })
}

/// Build a library with optional valuesets and error exceptions
pub fn library(value_sets: Option<Vec<Value>>, errors: Vec<Value>) -> ElmDocument {
    let mut library = json!({
        "identifier": {"id": "EncounterMeasure", "version": "0.0.000"},
        "schemaIdentifier": {"id": "urn:hl7-org:elm", "version": "r1"},
        "statements": {"def": []}
    });
    if let Some(defs) = value_sets {
        library["valueSets"] = json!({"def": defs});
    }

    let mut document = json!({"library": library});
    if !errors.is_empty() {
        document["errorExceptions"] = Value::Array(errors);
    }
    serde_json::from_value(document).unwrap()
}
