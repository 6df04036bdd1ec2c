//! HTTP adapters for the translation and terminology services

use crate::config::ServiceConfig;
use crate::terminology::{TerminologyError, ValueSetResolver};
use crate::translator::{CqlTranslator, TranslationError};
use async_trait::async_trait;
use measure_cql_elm::ElmDocument;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

/// Translator options sent with every translation request
pub const TRANSLATOR_OPTIONS: &[(&str, &str)] = &[
    ("showWarnings", "true"),
    ("annotations", "true"),
    ("locators", "true"),
    ("result-types", "true"),
    ("disable-list-demotion", "true"),
    ("disable-list-promotion", "true"),
    ("disable-method-invocation", "true"),
    ("validate-units", "true"),
];

/// Header carrying the terminology credential
pub const TERMINOLOGY_CREDENTIAL_HEADER: &str = "TGT";

fn build_client(config: &ServiceConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(config.timeout).build()
}

/// Translator backed by the CQL-to-ELM translation service
#[derive(Debug)]
pub struct HttpTranslator {
    endpoint: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpTranslator {
    /// Create a translator from the service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self, TranslationError> {
        let base_url = config
            .translator_url
            .as_deref()
            .ok_or_else(|| TranslationError::Rejected("No translator URL configured".to_string()))?;
        let client = build_client(config).map_err(|e| TranslationError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: format!("{base_url}/cql/translator/cql"),
            access_token: config.access_token.clone(),
            client,
        })
    }
}

#[async_trait]
impl CqlTranslator for HttpTranslator {
    async fn translate(&self, cql: &str) -> Result<ElmDocument, TranslationError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .query(TRANSLATOR_OPTIONS)
            .header(CONTENT_TYPE, "text/plain")
            .body(cql.to_string());
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Rejected(format!(
                "Translation service responded with {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        elm_from_response(body)
    }
}

/// Extract the ELM document from a translation response.
///
/// The service either returns the document itself or wraps its JSON text in
/// a `json` field.
pub fn elm_from_response(body: Value) -> Result<ElmDocument, TranslationError> {
    let document = match body.get("json").and_then(Value::as_str) {
        Some(wrapped) => ElmDocument::from_json(wrapped).map_err(|e| e.to_string()),
        None => serde_json::from_value(body).map_err(|e| e.to_string()),
    };
    document.map_err(TranslationError::InvalidResponse)
}

/// Valueset resolver backed by the terminology (VSAC) service
#[derive(Debug)]
pub struct HttpValueSetResolver {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpValueSetResolver {
    /// Create a resolver from the service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self, TerminologyError> {
        let base_url = config.terminology_url.as_deref().ok_or_else(|| {
            TerminologyError::Rejected("No terminology URL configured".to_string())
        })?;
        let client = build_client(config).map_err(|e| TerminologyError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: format!("{base_url}/vsac/valueset"),
            client,
        })
    }
}

#[async_trait]
impl ValueSetResolver for HttpValueSetResolver {
    async fn resolve_value_set(
        &self,
        credential: &str,
        oid: &str,
        locator: &str,
    ) -> Result<Value, TerminologyError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("oid", oid), ("locator", locator)])
            .header(TERMINOLOGY_CREDENTIAL_HEADER, credential)
            .send()
            .await
            .map_err(|e| TerminologyError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| TerminologyError::InvalidResponse(e.to_string()));
        }

        let body = response.json::<Value>().await.ok();
        Err(TerminologyError::Rejected(rejection_message(
            body.as_ref(),
            &status.to_string(),
        )))
    }
}

/// Pick the user-facing message out of a terminology error response
pub fn rejection_message(body: Option<&Value>, status: &str) -> String {
    body.and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("Terminology service responded with {status}"),
            str::to_string,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_elm_from_raw_document() {
        let body = json!({"library": {"identifier": {"id": "Raw"}}});
        let document = elm_from_response(body).unwrap();
        assert_eq!(document.identifier().and_then(|id| id.id.as_deref()), Some("Raw"));
    }

    #[test]
    fn test_elm_from_wrapped_document() {
        let body = json!({"json": "{\"library\": {\"identifier\": {\"id\": \"Wrapped\"}}}", "xml": ""});
        let document = elm_from_response(body).unwrap();
        assert_eq!(document.identifier().and_then(|id| id.id.as_deref()), Some("Wrapped"));
    }

    #[test]
    fn test_elm_from_invalid_response() {
        let err = elm_from_response(json!({"json": "not json"})).unwrap_err();
        assert!(matches!(err, TranslationError::InvalidResponse(_)));

        let err = elm_from_response(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, TranslationError::InvalidResponse(_)));
    }

    #[test]
    fn test_rejection_message() {
        let body = json!({"message": "Value set 2.16.840.1 not found"});
        assert_eq!(
            rejection_message(Some(&body), "404 Not Found"),
            "Value set 2.16.840.1 not found"
        );
        assert_eq!(
            rejection_message(None, "401 Unauthorized"),
            "Terminology service responded with 401 Unauthorized"
        );
        assert_eq!(
            rejection_message(Some(&json!({"message": ""})), "500 Internal Server Error"),
            "Terminology service responded with 500 Internal Server Error"
        );
    }

    #[test]
    fn test_missing_urls() {
        assert!(HttpTranslator::new(&ServiceConfig::default()).is_err());
        assert!(HttpValueSetResolver::new(&ServiceConfig::default()).is_err());
    }

    #[test]
    fn test_endpoints() {
        let config = ServiceConfig::new()
            .with_translator_url("https://translator.example.org/api/")
            .with_terminology_url("https://vsac.example.org");

        let translator = HttpTranslator::new(&config).unwrap();
        assert_eq!(translator.endpoint, "https://translator.example.org/api/cql/translator/cql");

        let resolver = HttpValueSetResolver::new(&config).unwrap();
        assert_eq!(resolver.endpoint, "https://vsac.example.org/vsac/valueset");
    }
}
