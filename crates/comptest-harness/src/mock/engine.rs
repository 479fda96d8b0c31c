//! Typed mock-factory table and mock creation

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use comptest_domain::{Error, Result, RoleKey};
use tracing::debug;

use super::control::MockControl;

/// Registry entry for a mock factory
///
/// Mock implementations register themselves with
/// `#[linkme::distributed_slice(MOCK_FACTORIES)]`. The `build`
/// function receives the control handle the engine created for the
/// mock and returns the instance type-erased as `Arc<T>` inside the
/// `Any`.
pub struct MockFactoryEntry {
    /// Role type name, for diagnostics
    pub role_name: &'static str,
    /// Key of the role this factory mocks
    pub role: fn() -> RoleKey,
    /// Factory producing the mock instance for a fresh control handle
    pub build: fn(Arc<MockControl>) -> Arc<dyn Any + Send + Sync>,
}

// Auto-collection via linkme distributed slices - mock impls submit
// entries at compile time
#[linkme::distributed_slice]
pub static MOCK_FACTORIES: [MockFactoryEntry] = [..];

type BoxedFactory = Box<dyn Fn(Arc<MockControl>) -> Arc<dyn Any + Send + Sync> + Send + Sync>;

/// Mock creation collaborator backed by a typed factory table
///
/// One engine exists per scope. The table is seeded from the
/// compile-time [`MOCK_FACTORIES`] slice and accepts additional
/// runtime registrations, keyed by the role's `TypeId` either way.
pub struct MockEngine {
    factories: Mutex<HashMap<TypeId, (RoleKey, BoxedFactory)>>,
}

impl MockEngine {
    /// Create an engine with an empty factory table
    pub fn new() -> Self {
        Self {
            factories: Mutex::new(HashMap::new()),
        }
    }

    /// Create an engine seeded from the compile-time factory slice
    pub fn with_registered() -> Self {
        let engine = Self::new();
        {
            let mut factories = engine.factories.lock().unwrap_or_else(|e| e.into_inner());
            for entry in MOCK_FACTORIES {
                let role = (entry.role)();
                let build = entry.build;
                factories.insert(role.type_id(), (role, Box::new(build)));
            }
            debug!(count = factories.len(), "seeded mock factory table");
        }
        engine
    }

    /// Register a factory for role `T` at runtime
    ///
    /// Replaces a compile-time entry for the same role, which lets a
    /// single test swap in a specialized mock build.
    pub fn register_factory<T, F>(&self, build: F)
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<MockControl>) -> Arc<T> + Send + Sync + 'static,
    {
        let role = RoleKey::of::<T>();
        let erased: BoxedFactory =
            Box::new(move |control| Arc::new(build(control)) as Arc<dyn Any + Send + Sync>);
        let mut factories = self.factories.lock().unwrap_or_else(|e| e.into_inner());
        factories.insert(role.type_id(), (role, erased));
    }

    /// Create a mock for role `T` with a fresh control handle
    pub fn create_mock<T: ?Sized + Send + Sync + 'static>(
        &self,
    ) -> Result<(Arc<T>, Arc<MockControl>)> {
        let role = RoleKey::of::<T>();
        let factories = self
            .factories
            .lock()
            .map_err(|_| Error::internal("mock factory table lock poisoned"))?;
        let (_, build) = factories.get(&role.type_id()).ok_or_else(|| {
            Error::missing_mock_factory(
                role.type_name(),
                factories
                    .values()
                    .map(|(key, _)| key.type_name().to_string())
                    .collect(),
            )
        })?;

        let control = Arc::new(MockControl::new(role.type_name()));
        let built = build(control.clone());
        let instance = built
            .downcast::<Arc<T>>()
            .map_err(|_| {
                Error::internal(format!(
                    "mock factory for '{}' built a different type",
                    role.type_name()
                ))
            })?
            .as_ref()
            .clone();
        debug!(role = role.type_name(), "created mock");
        Ok((instance, control))
    }

    /// Role type names with a registered factory
    pub fn registered_roles(&self) -> Vec<String> {
        self.factories
            .lock()
            .map(|factories| {
                factories
                    .values()
                    .map(|(key, _)| key.type_name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}
