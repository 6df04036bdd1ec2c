//! Service configuration for the translator and terminology adapters

use std::time::Duration;

/// Default request timeout for service calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the translator and terminology services live and how to call them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the CQL-to-ELM translation service
    pub translator_url: Option<String>,
    /// Base URL of the terminology (VSAC) service
    pub terminology_url: Option<String>,
    /// Bearer token sent to the translation service
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            translator_url: None,
            terminology_url: None,
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translator base URL
    pub fn with_translator_url(mut self, url: impl Into<String>) -> Self {
        self.translator_url = Some(normalize_base_url(url.into()));
        self
    }

    /// Set the terminology base URL
    pub fn with_terminology_url(mut self, url: impl Into<String>) -> Self {
        self.terminology_url = Some(normalize_base_url(url.into()));
        self
    }

    /// Set the bearer token for the translator
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into()).filter(|token: &String| !token.is_empty());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
