//! Scope-owned lazy keyed cache
//!
//! Memoized get-or-create by string key: the supplier for a key runs
//! exactly once per scope, and every later read returns the same
//! value object. The cache is owned by the [`Scope`](crate::scope::Scope)
//! and passed by reference to whichever component needs memoized
//! construction; there is no ambient context lookup.
//!
//! The scope model is single-threaded, so the internal mutex exists
//! only to keep the cache `Send + Sync`; the supplier runs outside the
//! lock and a lost race keeps the first stored value.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use comptest_domain::{Error, Result};
use tracing::debug;

/// String-keyed memoization store, one per scope
#[derive(Default)]
pub struct ExecutionCache {
    entries: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl ExecutionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for `key`, creating it with `supplier` on first use
    ///
    /// A supplier error propagates and stores nothing, so a failed
    /// initialization may be retried on the next call.
    pub fn get_or_create<T, F>(&self, key: &str, supplier: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T>,
    {
        if let Some(existing) = self.lookup::<T>(key)? {
            return Ok(existing);
        }

        debug!(key, "initializing cache entry");
        let value = Arc::new(supplier()?);

        let mut entries = self.entries.lock().map_err(poisoned)?;
        let stored = entries
            .entry(key.to_string())
            .or_insert_with(|| value.clone());
        downcast_entry::<T>(key, stored)
    }

    /// Get the value for `key` if present, without creating it
    pub fn lookup<T: Send + Sync + 'static>(&self, key: &str) -> Result<Option<Arc<T>>> {
        let entries = self.entries.lock().map_err(poisoned)?;
        entries
            .get(key)
            .map(|stored| downcast_entry::<T>(key, stored))
            .transpose()
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard every entry; called at scope teardown
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

fn downcast_entry<T: Send + Sync + 'static>(
    key: &str,
    stored: &Arc<dyn Any + Send + Sync>,
) -> Result<Arc<T>> {
    stored
        .clone()
        .downcast::<T>()
        .map_err(|_| Error::internal(format!("cache entry '{key}' holds a different type")))
}

fn poisoned<E>(_: E) -> Error {
    Error::internal("execution cache lock poisoned")
}
