//! Valueset validation fan-out
//!
//! Every valueset referenced by a library is validated independently and
//! concurrently. A failing lookup becomes one error record positioned on the
//! `valueset` declaration; it never cancels or hides its siblings.

use crate::terminology::ValueSetResolver;
use futures::future::join_all;
use log::{debug, warn};
use measure_cql_diagnostics::{ElmError, parse_locator};
use measure_cql_elm::ElmValueSetRef;
use regex::Regex;
use std::sync::LazyLock;

static OID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-2](\.(0|[1-9][0-9]*))+").expect("OID pattern is a valid regex")
});

/// Message prefix for a valueset whose identifier carries no OID
pub const INVALID_IDENTIFIER_MESSAGE: &str = "Invalid valueset identifier";

/// Extract the first ITU-T OID found in a valueset identifier
pub fn extract_oid(id: &str) -> Option<&str> {
    OID_PATTERN.find(id).map(|found| found.as_str())
}

/// Validate valuesets against the terminology service.
///
/// Returns nothing, without contacting the service, when there are no
/// references or no credential. Otherwise one error is returned per failed
/// lookup and per identifier without an OID, in the order of `refs`
/// regardless of completion order.
pub async fn validate_valuesets(
    resolver: &dyn ValueSetResolver,
    refs: &[ElmValueSetRef],
    credential: Option<&str>,
) -> Vec<ElmError> {
    let Some(credential) = credential.filter(|credential| !credential.is_empty()) else {
        debug!("No terminology credential, skipping {} valueset(s)", refs.len());
        return Vec::new();
    };
    if refs.is_empty() {
        return Vec::new();
    }

    debug!("Validating {} valueset(s)", refs.len());
    let lookups = refs
        .iter()
        .map(|value_set| validate_valueset(resolver, value_set, credential));

    join_all(lookups).await.into_iter().flatten().collect()
}

async fn validate_valueset(
    resolver: &dyn ValueSetResolver,
    value_set: &ElmValueSetRef,
    credential: &str,
) -> Option<ElmError> {
    let locator = value_set.locator();
    let Some(oid) = extract_oid(&value_set.id) else {
        warn!("Valueset '{}' has no OID, reporting it without a lookup", value_set.id);
        return Some(ElmError::value_set(
            format!("{INVALID_IDENTIFIER_MESSAGE}: {}", value_set.id),
            parse_locator(locator),
        ));
    };

    match resolver.resolve_value_set(credential, oid, locator).await {
        Ok(_) => {
            debug!("Valueset {oid} resolved");
            None
        }
        Err(err) => {
            debug!("Valueset {oid} failed at {locator}: {err}");
            Some(ElmError::value_set(err.to_string(), parse_locator(locator)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "http://cts.nlm.nih.gov/fhir/ValueSet/2.16.840.1.113883.3.666.5.307",
        Some("2.16.840.1.113883.3.666.5.307")
    )]
    #[case("urn:oid:2.16.840.1.113883.3.117.1.7.1.292", Some("2.16.840.1.113883.3.117.1.7.1.292"))]
    #[case("urn:oid:1.2.3", Some("1.2.3"))]
    #[case("http://example.org/ValueSet/abc", None)]
    #[case("", None)]
    fn test_extract_oid(#[case] id: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_oid(id), expected);
    }

    #[test]
    fn test_extract_oid_stops_at_leading_zero_arc() {
        // `01` is not a valid arc, so the match ends before it.
        assert_eq!(extract_oid("2.16.01"), Some("2.16.0"));
    }
}
