//! DI container and builder
//!
//! The container is the per-scope component store. Config modules are
//! applied in order against a [`ContainerBuilder`] (the
//! [`ComponentRegistrar`] implementation), and resolution consults the
//! scope's [`MockRegistry`] before the module-registered components so
//! that every mock registration pre-seeds lookups made by
//! code-under-test.

use std::any::Any;
use std::sync::{Arc, Mutex};

use comptest_domain::{
    ComponentKey, ComponentRegistrar, ConfigModule, Error, Result, RoleKey,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::registry::MockRegistry;

type ComponentMap = IndexMap<ComponentKey, Arc<dyn Any + Send + Sync>>;

/// Collects module-registered components before the container exists
#[derive(Default)]
pub struct ContainerBuilder {
    components: ComponentMap,
}

impl ContainerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish wiring and produce the container
    pub fn build(self, registry: Arc<MockRegistry>) -> Container {
        debug!(components = self.components.len(), "built container");
        Container {
            components: Mutex::new(self.components),
            registry,
        }
    }
}

impl ComponentRegistrar for ContainerBuilder {
    fn register_any(
        &mut self,
        key: ComponentKey,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<()> {
        self.components.insert(key, instance);
        Ok(())
    }
}

/// Per-scope DI container
pub struct Container {
    components: Mutex<ComponentMap>,
    registry: Arc<MockRegistry>,
}

impl Container {
    /// Build a container by applying config modules in order
    pub fn from_configs(
        configs: &[Arc<dyn ConfigModule>],
        registry: Arc<MockRegistry>,
    ) -> Result<Self> {
        let mut builder = ContainerBuilder::new();
        for module in configs {
            debug!(module = module.name(), "applying config module");
            module.configure(&mut builder).map_err(|e| {
                Error::configuration_with_source(
                    format!("config module '{}' failed", module.name()),
                    e,
                )
            })?;
        }
        Ok(builder.build(registry))
    }

    /// Resolve the component for `(T, hint)`
    ///
    /// The mock registry wins over module wiring; absence fails with
    /// [`Error::UnresolvedComponent`].
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
    ) -> Result<Arc<T>> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        self.lookup_key::<T>(&key)?.ok_or_else(|| {
            Error::unresolved_component(key.role().type_name(), key.hint())
        })
    }

    /// Resolve the component for `(T, hint)` if present
    pub fn lookup<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
    ) -> Result<Option<Arc<T>>> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        self.lookup_key::<T>(&key)
    }

    /// Resolve the default-hint singleton for `T`
    pub fn get_singleton<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.resolve::<T>(None)
    }

    /// Number of module-registered components still held
    pub fn component_count(&self) -> usize {
        self.components.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Release every held component; idempotent
    pub fn close(&self) {
        if let Ok(mut components) = self.components.lock() {
            if !components.is_empty() {
                debug!(components = components.len(), "closing container");
            }
            components.clear();
        }
    }

    fn lookup_key<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: &ComponentKey,
    ) -> Result<Option<Arc<T>>> {
        let erased = self.registry.lookup_any(key).or_else(|| {
            self.components
                .lock()
                .ok()
                .and_then(|components| components.get(key).cloned())
        });
        erased
            .map(|instance| {
                instance.downcast_ref::<Arc<T>>().cloned().ok_or_else(|| {
                    Error::internal(format!("component for {key} holds a different type"))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptest_domain::ComponentRegistrarExt;

    use crate::mock::MockEngine;

    trait Clock: Send + Sync + std::fmt::Debug {
        fn now(&self) -> u64;
    }

    #[derive(Debug)]
    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            self.0
        }
    }

    struct ClockConfig;

    impl ConfigModule for ClockConfig {
        fn name(&self) -> &str {
            "clock"
        }

        fn configure(&self, registrar: &mut dyn ComponentRegistrar) -> Result<()> {
            let clock: Arc<dyn Clock> = Arc::new(FixedClock(7));
            registrar.register::<dyn Clock>(None, clock)
        }
    }

    fn empty_registry() -> Arc<MockRegistry> {
        Arc::new(MockRegistry::new(Arc::new(MockEngine::new())))
    }

    #[test]
    fn test_modules_wire_components() {
        let configs: Vec<Arc<dyn ConfigModule>> = vec![Arc::new(ClockConfig)];
        let container = Container::from_configs(&configs, empty_registry()).unwrap();
        let clock = container.get_singleton::<dyn Clock>().unwrap();
        assert_eq!(clock.now(), 7);
    }

    #[test]
    fn test_unresolved_component_errors() {
        let container = Container::from_configs(&[], empty_registry()).unwrap();
        let err = container.resolve::<dyn Clock>(None).unwrap_err();
        assert!(matches!(err, Error::UnresolvedComponent { .. }));
    }

    #[test]
    fn test_registry_wins_over_module_wiring() {
        let registry = empty_registry();
        let configs: Vec<Arc<dyn ConfigModule>> = vec![Arc::new(ClockConfig)];
        let container = Container::from_configs(&configs, registry.clone()).unwrap();

        let override_clock: Arc<dyn Clock> = Arc::new(FixedClock(99));
        registry
            .register_mock::<dyn Clock>(None, override_clock)
            .unwrap();
        assert_eq!(container.get_singleton::<dyn Clock>().unwrap().now(), 99);
    }

    #[test]
    fn test_close_is_idempotent_and_releases() {
        let configs: Vec<Arc<dyn ConfigModule>> = vec![Arc::new(ClockConfig)];
        let container = Container::from_configs(&configs, empty_registry()).unwrap();
        assert_eq!(container.component_count(), 1);
        container.close();
        container.close();
        assert_eq!(container.component_count(), 0);
        assert!(container.lookup::<dyn Clock>(None).unwrap().is_none());
    }
}
