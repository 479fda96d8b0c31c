//! Container wiring contracts
//!
//! A [`ConfigModule`] is one unit of container wiring: the scope
//! lifecycle applies an ordered sequence of modules when it builds a
//! fresh container, and each module registers its components through
//! the [`ComponentRegistrar`] it is handed. Modules must be immutable
//! values; they are the only state allowed to be shared across tests.

use std::any::Any;
use std::sync::Arc;

use crate::error::Result;
use crate::role::{ComponentKey, RoleKey};

/// Receiver side of container wiring
///
/// Object-safe core: instances are stored type-erased. The stored
/// `dyn Any` always wraps an `Arc<T>` for the keyed role `T`, which is
/// what typed resolution downcasts back to.
pub trait ComponentRegistrar {
    /// Register a type-erased component under the given key
    ///
    /// Registering the same key twice replaces the previous instance.
    fn register_any(
        &mut self,
        key: ComponentKey,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<()>;
}

/// Typed convenience layer over [`ComponentRegistrar`]
pub trait ComponentRegistrarExt: ComponentRegistrar {
    /// Register a component instance for role `T` with an optional hint
    fn register<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        hint: Option<&str>,
        instance: Arc<T>,
    ) -> Result<()> {
        let key = ComponentKey::new(RoleKey::of::<T>(), hint);
        self.register_any(key, Arc::new(instance))
    }
}

impl<R: ComponentRegistrar + ?Sized> ComponentRegistrarExt for R {}

/// One unit of container wiring, applied in order at scope begin
pub trait ConfigModule: Send + Sync {
    /// Module name, for diagnostics
    fn name(&self) -> &str;

    /// Register this module's components into the container under
    /// construction
    fn configure(&self, registrar: &mut dyn ComponentRegistrar) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapRegistrar {
        entries: HashMap<ComponentKey, Arc<dyn Any + Send + Sync>>,
    }

    impl ComponentRegistrar for MapRegistrar {
        fn register_any(
            &mut self,
            key: ComponentKey,
            instance: Arc<dyn Any + Send + Sync>,
        ) -> Result<()> {
            self.entries.insert(key, instance);
            Ok(())
        }
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct FixedGreeter;

    impl Greeter for FixedGreeter {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    #[test]
    fn test_typed_registration_roundtrip() {
        let mut registrar = MapRegistrar::default();
        let greeter: Arc<dyn Greeter> = Arc::new(FixedGreeter);
        registrar.register::<dyn Greeter>(None, greeter).unwrap();

        let stored = registrar
            .entries
            .get(&ComponentKey::of::<dyn Greeter>())
            .expect("registered entry");
        let typed = stored
            .downcast_ref::<Arc<dyn Greeter>>()
            .expect("stored as Arc<dyn Greeter>");
        assert_eq!(typed.greet(), "hello");
    }
}
