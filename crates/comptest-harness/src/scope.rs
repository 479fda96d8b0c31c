//! Per-test scope and its lifecycle holder
//!
//! One scope exists per test case and owns the container, the mock
//! registry, the mock engine and the execution cache. The current
//! binding is a `thread_local!` slot, so test frameworks that run
//! cases concurrently get one independent scope per thread; there is
//! no process-global state.
//!
//! Lifecycle state machine: `Idle -> Active` on [`Scope::begin`],
//! `Active -> Idle` on [`Scope::end`]. `begin` while Active is an
//! error; `end` while Idle is a no-op so teardown hooks stay safe
//! after a partially failed begin.

use std::cell::RefCell;
use std::sync::Arc;

use comptest_domain::{ConfigModule, Error, Result};
use tracing::{debug, info};

use crate::cache::ExecutionCache;
use crate::container::Container;
use crate::mock::MockEngine;
use crate::registry::MockRegistry;

thread_local! {
    static CURRENT: RefCell<Option<Arc<Scope>>> = const { RefCell::new(None) };
}

/// The lifetime unit of one test case
pub struct Scope {
    container: Arc<Container>,
    registry: Arc<MockRegistry>,
    cache: Arc<ExecutionCache>,
    engine: Arc<MockEngine>,
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").finish_non_exhaustive()
    }
}

impl Scope {
    /// Construct a fresh scope from the given config modules and bind
    /// it to the current thread
    ///
    /// Fails with [`Error::Initialization`] if a scope is already
    /// bound; `end()` must run first.
    pub fn begin(configs: &[Arc<dyn ConfigModule>]) -> Result<Arc<Scope>> {
        CURRENT.with(|slot| {
            if slot.borrow().is_some() {
                return Err(Error::initialization(
                    "a test scope is already active on this thread",
                ));
            }

            let engine = Arc::new(MockEngine::with_registered());
            let registry = Arc::new(MockRegistry::new(engine.clone()));
            let cache = Arc::new(ExecutionCache::new());
            let container = Arc::new(Container::from_configs(configs, registry.clone())?);

            let scope = Arc::new(Scope {
                container,
                registry,
                cache,
                engine,
            });
            *slot.borrow_mut() = Some(scope.clone());
            info!(modules = configs.len(), "test scope active");
            Ok(scope)
        })
    }

    /// The scope bound to the current thread
    pub fn current() -> Result<Arc<Scope>> {
        CURRENT.with(|slot| {
            slot.borrow().clone().ok_or_else(|| {
                Error::no_active_scope("no test scope is bound to this thread")
            })
        })
    }

    /// Unbind and discard the current scope
    ///
    /// Closes the container and empties the registry and cache. A
    /// no-op when no scope is bound, so it is always safe to call from
    /// a teardown hook.
    pub fn end() -> Result<()> {
        let scope = CURRENT.with(|slot| slot.borrow_mut().take());
        match scope {
            Some(scope) => {
                scope.teardown();
                info!("test scope ended");
                Ok(())
            }
            None => {
                debug!("scope end requested while idle");
                Ok(())
            }
        }
    }

    /// Whether a scope is bound to the current thread
    pub fn is_active() -> bool {
        CURRENT.with(|slot| slot.borrow().is_some())
    }

    /// The scope's DI container
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// The scope's mock registry
    pub fn registry(&self) -> &Arc<MockRegistry> {
        &self.registry
    }

    /// The scope's execution cache
    pub fn cache(&self) -> &Arc<ExecutionCache> {
        &self.cache
    }

    /// The scope's mock engine
    pub fn engine(&self) -> &Arc<MockEngine> {
        &self.engine
    }

    fn teardown(&self) {
        self.container.close();
        self.registry.clear();
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scope binding is thread-local; each test runs in its own
    // thread under the default test runner, and these serialize their
    // own begin/end pairs regardless.

    #[test]
    fn test_begin_while_active_fails() {
        let _scope = Scope::begin(&[]).unwrap();
        let err = Scope::begin(&[]).unwrap_err();
        assert!(matches!(err, Error::Initialization { .. }));
        Scope::end().unwrap();
    }

    #[test]
    fn test_current_while_idle_fails() {
        assert!(!Scope::is_active());
        let err = Scope::current().unwrap_err();
        assert!(matches!(err, Error::NoActiveScope { .. }));
    }

    #[test]
    fn test_end_while_idle_is_noop() {
        Scope::end().unwrap();
        Scope::end().unwrap();
    }

    #[test]
    fn test_scopes_are_thread_local() {
        let _outer = Scope::begin(&[]).unwrap();
        std::thread::spawn(|| {
            // fresh thread, fresh binding
            assert!(!Scope::is_active());
            let _inner = Scope::begin(&[]).unwrap();
            Scope::end().unwrap();
        })
        .join()
        .unwrap();
        assert!(Scope::is_active());
        Scope::end().unwrap();
    }
}
