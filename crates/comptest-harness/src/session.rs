//! Lazily cached per-test session context
//!
//! A small context object code-under-test and test helpers share
//! within one scope: deterministic database/site/language defaults
//! plus a string-keyed value store. It is memoized in the scope's
//! [`ExecutionCache`] under a fixed key, so every accessor call in a
//! test observes the same object and construction runs exactly once.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use comptest_domain::Result;

use crate::cache::ExecutionCache;
use crate::config::SessionDefaults;

/// Cache key the session context is memoized under
pub const SESSION_CONTEXT_KEY: &str = "session-context";

/// Shared per-test session state
pub struct SessionContext {
    database: String,
    site: String,
    language: String,
    values: RwLock<HashMap<String, String>>,
}

impl SessionContext {
    /// Create a context from the configured defaults
    pub fn new(defaults: &SessionDefaults) -> Self {
        Self {
            database: defaults.database.clone(),
            site: defaults.site.clone(),
            language: defaults.language.clone(),
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Active database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Active site name
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Active language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Store an ad-hoc value under `key`
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }

    /// Read an ad-hoc value stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }
}

/// The scope's session context, constructed on first access
pub fn session_context(
    cache: &ExecutionCache,
    defaults: &SessionDefaults,
) -> Result<Arc<SessionContext>> {
    cache.get_or_create(SESSION_CONTEXT_KEY, || Ok(SessionContext::new(defaults)))
}
