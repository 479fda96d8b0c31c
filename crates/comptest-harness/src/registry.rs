//! Mock registry
//!
//! Maps `(role, hint)` to a single mock instance per scope and tracks
//! the *default mock set*: mocks the bench created itself, batch
//! driven through record/replay/verify as one unit. Explicitly
//! supplied instances are registered alongside but stay outside the
//! default set; their lifecycle belongs to the test author.
//!
//! Registration policy:
//!
//! - default registration fails on a duplicate key, since a silent
//!   overwrite would mask a test authoring bug;
//! - explicit registration overwrites silently, it is an intentional
//!   override and wins over a prior default.

use std::any::Any;
use std::sync::{Arc, Mutex};

use comptest_domain::{ComponentKey, Error, Result, RoleKey};
use indexmap::IndexMap;
use tracing::debug;

use crate::mock::{MockControl, MockEngine};

struct RegistryEntry {
    instance: Arc<dyn Any + Send + Sync>,
    default: bool,
}

/// Scope-local store of mock registrations
pub struct MockRegistry {
    engine: Arc<MockEngine>,
    entries: Mutex<IndexMap<ComponentKey, RegistryEntry>>,
    // Insertion-ordered and monotonic for the scope's lifetime; an
    // explicit overwrite of a default entry does not shrink it.
    defaults: Mutex<Vec<Arc<MockControl>>>,
}

impl MockRegistry {
    /// Create an empty registry backed by the given engine
    pub fn new(engine: Arc<MockEngine>) -> Self {
        Self {
            engine,
            entries: Mutex::new(IndexMap::new()),
            defaults: Mutex::new(Vec::new()),
        }
    }

    /// The engine this registry creates default mocks with
    pub fn engine(&self) -> &Arc<MockEngine> {
        &self.engine
    }

    /// Create and register a default mock for role `T` (default hint)
    pub fn create_default_mock<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.register_default_mock::<T>(None)
    }

    /// Create and register a default mock for role `T` with an
    /// optional hint
    ///
    /// Fails with [`Error::DuplicateRegistration`] if any entry
    /// already exists for the `(role, hint)` key.
    pub fn register_default_mock<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
    ) -> Result<Arc<T>> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        let mut entries = self.lock_entries()?;
        if entries.contains_key(&key) {
            return Err(Error::duplicate_registration(
                key.role().type_name(),
                key.hint(),
            ));
        }

        let (instance, control) = self.engine.create_mock::<T>()?;
        entries.insert(
            key.clone(),
            RegistryEntry {
                instance: Arc::new(instance.clone()),
                default: true,
            },
        );
        drop(entries);

        self.lock_defaults()?.push(control);
        debug!(%key, "registered default mock");
        Ok(instance)
    }

    /// Register an explicitly supplied instance for role `T`
    ///
    /// Overwrites silently if an entry already exists for the key.
    pub fn register_mock<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
        instance: Arc<T>,
    ) -> Result<()> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        let mut entries = self.lock_entries()?;
        let replaced = entries
            .insert(
                key.clone(),
                RegistryEntry {
                    instance: Arc::new(instance),
                    default: false,
                },
            )
            .is_some();
        debug!(%key, replaced, "registered explicit mock");
        Ok(())
    }

    /// Current instance for `(T, default hint)`, if any
    pub fn lookup<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        self.lookup_hint::<T>(None)
    }

    /// Current instance for `(T, hint)`, if any
    pub fn lookup_hint<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
    ) -> Result<Option<Arc<T>>> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        let entries = self.lock_entries()?;
        entries
            .get(&key)
            .map(|entry| {
                entry
                    .instance
                    .downcast_ref::<Arc<T>>()
                    .cloned()
                    .ok_or_else(|| {
                        Error::internal(format!("registry entry for {key} holds a different type"))
                    })
            })
            .transpose()
    }

    /// Type-erased lookup used by the container's resolver
    pub fn lookup_any(&self, key: &ComponentKey) -> Option<Arc<dyn Any + Send + Sync>> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).map(|entry| entry.instance.clone())
    }

    /// The default mock instance for `T`, creating it on first access
    ///
    /// Idempotent: a second call returns the same instance, never a
    /// second mock.
    pub fn mock_or_default<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        if let Some(existing) = self.lookup::<T>()? {
            return Ok(existing);
        }
        self.create_default_mock::<T>()
    }

    /// Snapshot of the default mock set, in insertion order
    pub fn default_mocks(&self) -> Vec<Arc<MockControl>> {
        self.defaults
            .lock()
            .map(|defaults| defaults.clone())
            .unwrap_or_default()
    }

    /// Number of registered `(role, hint)` entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the entry for `key` was created as a default mock
    pub fn is_default(&self, key: &ComponentKey) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.get(key).is_some_and(|e| e.default))
            .unwrap_or(false)
    }

    /// Discard every entry and the default set; called at scope teardown
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
        if let Ok(mut defaults) = self.defaults.lock() {
            defaults.clear();
        }
    }

    fn lock_entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, IndexMap<ComponentKey, RegistryEntry>>> {
        self.entries
            .lock()
            .map_err(|_| Error::internal("mock registry lock poisoned"))
    }

    fn lock_defaults(&self) -> Result<std::sync::MutexGuard<'_, Vec<Arc<MockControl>>>> {
        self.defaults
            .lock()
            .map_err(|_| Error::internal("default mock set lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Journal: Send + Sync + std::fmt::Debug {
        fn append(&self, line: &str) -> Result<()>;
    }

    #[derive(Debug)]
    struct MockJournal {
        control: Arc<MockControl>,
    }

    impl Journal for MockJournal {
        fn append(&self, _line: &str) -> Result<()> {
            self.control.touch("append")
        }
    }

    fn registry() -> MockRegistry {
        let engine = Arc::new(MockEngine::new());
        engine.register_factory::<dyn Journal, _>(|control| Arc::new(MockJournal { control }));
        MockRegistry::new(engine)
    }

    #[test]
    fn test_duplicate_default_registration_fails() {
        let registry = registry();
        registry.create_default_mock::<dyn Journal>().unwrap();
        let err = registry.create_default_mock::<dyn Journal>().unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
    }

    #[test]
    fn test_same_role_distinct_hints_coexist() {
        let registry = registry();
        registry
            .register_default_mock::<dyn Journal>(Some("a"))
            .unwrap();
        registry
            .register_default_mock::<dyn Journal>(Some("b"))
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_mocks().len(), 2);
    }

    #[test]
    fn test_lookup_returns_identical_instance() {
        let registry = registry();
        let created = registry.create_default_mock::<dyn Journal>().unwrap();
        let first = registry.lookup::<dyn Journal>().unwrap().unwrap();
        let second = registry.lookup::<dyn Journal>().unwrap().unwrap();
        assert!(Arc::ptr_eq(&created, &first));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_explicit_registration_overwrites_default() {
        let registry = registry();
        let default = registry.create_default_mock::<dyn Journal>().unwrap();
        let control = Arc::new(MockControl::new("explicit journal"));
        let explicit: Arc<dyn Journal> = Arc::new(MockJournal { control });
        registry
            .register_mock::<dyn Journal>(None, explicit.clone())
            .unwrap();

        let resolved = registry.lookup::<dyn Journal>().unwrap().unwrap();
        assert!(Arc::ptr_eq(&resolved, &explicit));
        assert!(!Arc::ptr_eq(&resolved, &default));
        // the prior default stays batch-controlled
        assert_eq!(registry.default_mocks().len(), 1);
        assert!(!registry.is_default(&ComponentKey::of::<dyn Journal>()));
    }

    #[test]
    fn test_mock_or_default_is_idempotent() {
        let registry = registry();
        let first = registry.mock_or_default::<dyn Journal>().unwrap();
        let second = registry.mock_or_default::<dyn Journal>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.default_mocks().len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let registry = registry();
        registry.create_default_mock::<dyn Journal>().unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.default_mocks().is_empty());
        assert!(registry.lookup::<dyn Journal>().unwrap().is_none());
    }
}
