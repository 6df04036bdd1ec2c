//! Terminology (valueset) resolution seam

use async_trait::async_trait;
use serde_json::Value;

/// Trait for resolving one valueset against a terminology service
#[async_trait]
pub trait ValueSetResolver: Send + Sync {
    /// Resolve the valueset identified by `oid`.
    ///
    /// `credential` is the terminology login token and `locator` the source
    /// range of the `valueset` declaration, passed through for services that
    /// echo it back. On success the service payload is returned; its content
    /// is not interpreted.
    async fn resolve_value_set(
        &self,
        credential: &str,
        oid: &str,
        locator: &str,
    ) -> Result<Value, TerminologyError>;
}

/// Terminology error.
///
/// The display text of an error becomes the message of the diagnostic shown
/// on the `valueset` declaration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TerminologyError {
    /// The service looked the valueset up and reported a problem with it
    #[error("{0}")]
    Rejected(String),

    #[error("Terminology service unreachable: {0}")]
    Network(String),

    #[error("Invalid terminology response: {0}")]
    InvalidResponse(String),
}

/// Resolver that accepts every valueset
pub struct NoOpValueSetResolver;

#[async_trait]
impl ValueSetResolver for NoOpValueSetResolver {
    async fn resolve_value_set(
        &self,
        _credential: &str,
        _oid: &str,
        _locator: &str,
    ) -> Result<Value, TerminologyError> {
        Ok(Value::Null)
    }
}

impl NoOpValueSetResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpValueSetResolver {
    fn default() -> Self {
        Self::new()
    }
}
