//! Mock implementations for testing
//!
//! Provides a scripted translator and a configurable terminology service that
//! records every lookup it receives.

use async_trait::async_trait;
use measure_cql::{
    CqlTranslator, ElmDocument, TerminologyError, TranslationError, ValueSetResolver,
};
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Mock translator returning a fixed document or a fixed failure
pub struct MockTranslator {
    result: Result<ElmDocument, TranslationError>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn returning(document: ElmDocument) -> Self {
        Self {
            result: Ok(document),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(TranslationError::Rejected(message.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// CQL texts received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CqlTranslator for MockTranslator {
    async fn translate(&self, cql: &str) -> Result<ElmDocument, TranslationError> {
        self.requests.lock().push(cql.to_string());
        self.result.clone()
    }
}

/// One lookup received by [`MockValueSetResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub credential: String,
    pub oid: String,
    pub locator: String,
}

/// Mock terminology service with per-OID failures and delays
pub struct MockValueSetResolver {
    failures: Arc<RwLock<HashMap<String, String>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    lookups: Arc<Mutex<Vec<Lookup>>>,
}

impl MockValueSetResolver {
    pub fn new() -> Self {
        Self {
            failures: Arc::new(RwLock::new(HashMap::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure a valueset lookup to fail with a message
    pub fn fail(&self, oid: impl Into<String>, message: impl Into<String>) {
        self.failures.write().insert(oid.into(), message.into());
    }

    /// Configure a valueset lookup to take a while
    pub fn delay(&self, oid: impl Into<String>, delay: Duration) {
        self.delays.write().insert(oid.into(), delay);
    }

    /// Lookups received so far, in arrival order
    pub fn lookups(&self) -> Vec<Lookup> {
        self.lookups.lock().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().len()
    }
}

impl Default for MockValueSetResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ValueSetResolver for MockValueSetResolver {
    async fn resolve_value_set(
        &self,
        credential: &str,
        oid: &str,
        locator: &str,
    ) -> Result<Value, TerminologyError> {
        self.lookups.lock().push(Lookup {
            credential: credential.to_string(),
            oid: oid.to_string(),
            locator: locator.to_string(),
        });

        let delay = self.delays.read().get(oid).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.read().get(oid).cloned();
        match failure {
            Some(message) => Err(TerminologyError::Rejected(message)),
            None => Ok(json!({"oid": oid})),
        }
    }
}
