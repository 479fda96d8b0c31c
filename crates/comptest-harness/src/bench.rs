//! Test bench composition root
//!
//! [`TestBench`] orchestrates the scope across one test case's
//! setup/teardown boundary and exposes the lookup/registration surface
//! test code works against:
//!
//! ```text
//! TestBench::with_defaults(configs)
//!         │
//!         ▼
//! Scope::begin ──▶ Container (config modules, in order)
//!         │               │
//!         │               ▼
//!         │        EnvironmentHost singleton ◀── StubResourceEnvironment
//!         ▼
//! register mocks ──▶ replay ──▶ exercise code-under-test ──▶ verify
//!         │
//!         ▼
//! tear_down / Drop ──▶ Scope::end (container, registry, cache discarded)
//! ```
//!
//! Dropping the bench without an explicit [`TestBench::tear_down`]
//! still ends the scope, so cleanup runs even when the test body
//! panics out of the case.

use std::sync::Arc;

use comptest_domain::{
    ComponentRegistrar, ComponentRegistrarExt, ConfigModule, MockController, Result,
};
use tracing::{debug, warn};

use crate::batch::BatchController;
use crate::cache::ExecutionCache;
use crate::config::BenchConfig;
use crate::container::Container;
use crate::env::{EnvironmentHost, StubResourceEnvironment};
use crate::registry::MockRegistry;
use crate::scope::Scope;
use crate::session::{session_context, SessionContext};

/// Core wiring every bench scope needs
///
/// Registers the [`EnvironmentHost`] singleton the bench installs the
/// stub environment into. Prepended automatically by
/// [`TestBench::with_defaults`].
pub struct CoreConfigModule;

impl ConfigModule for CoreConfigModule {
    fn name(&self) -> &str {
        "comptest-core"
    }

    fn configure(&self, registrar: &mut dyn ComponentRegistrar) -> Result<()> {
        registrar.register::<EnvironmentHost>(None, Arc::new(EnvironmentHost::new()))
    }
}

/// Scoped test bench: one instance per test case
pub struct TestBench {
    scope: Arc<Scope>,
    batch: BatchController,
    config: BenchConfig,
    torn_down: bool,
}

impl std::fmt::Debug for TestBench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestBench")
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl TestBench {
    /// Begin a scope over exactly the given config modules
    ///
    /// The modules must register an [`EnvironmentHost`]; use
    /// [`TestBench::with_defaults`] unless the test replaces the core
    /// wiring deliberately.
    pub fn set_up(configs: Vec<Arc<dyn ConfigModule>>) -> Result<Self> {
        Self::set_up_with_config(configs, BenchConfig::default())
    }

    /// Begin a scope with the core module prepended to `extra_configs`
    pub fn with_defaults(extra_configs: Vec<Arc<dyn ConfigModule>>) -> Result<Self> {
        let mut configs: Vec<Arc<dyn ConfigModule>> = vec![Arc::new(CoreConfigModule)];
        configs.extend(extra_configs);
        Self::set_up(configs)
    }

    /// Begin a scope with explicit bench settings
    pub fn set_up_with_config(
        configs: Vec<Arc<dyn ConfigModule>>,
        config: BenchConfig,
    ) -> Result<Self> {
        let scope = Scope::begin(&configs)?;

        if let Err(e) = Self::install_environment(&scope, &config) {
            // leave the thread reusable for the next set_up attempt
            if let Err(cleanup) = Scope::end() {
                warn!(error = %cleanup, "scope cleanup after failed set_up");
            }
            return Err(e);
        }

        let batch = BatchController::new(scope.registry().clone());
        debug!("test bench ready");
        Ok(Self {
            scope,
            batch,
            config,
            torn_down: false,
        })
    }

    fn install_environment(scope: &Arc<Scope>, config: &BenchConfig) -> Result<()> {
        let mut stub = StubResourceEnvironment::bundled();
        for resource in &config.resources.extra {
            stub = stub.with_resource(resource.name.clone(), resource.path.clone());
        }
        let host = scope.container().get_singleton::<EnvironmentHost>()?;
        host.install(Arc::new(stub));
        Ok(())
    }

    /// End the scope and discard all scope-local state
    pub fn tear_down(mut self) -> Result<()> {
        self.torn_down = true;
        Scope::end()
    }

    // ========================================================================
    // Scope access
    // ========================================================================

    /// The scope's DI container
    pub fn container(&self) -> &Arc<Container> {
        self.scope.container()
    }

    /// The scope's mock registry
    pub fn registry(&self) -> &Arc<MockRegistry> {
        self.scope.registry()
    }

    /// The scope's execution cache
    pub fn cache(&self) -> &Arc<ExecutionCache> {
        self.scope.cache()
    }

    /// The lazily created session context for this scope
    pub fn session_context(&self) -> Result<Arc<SessionContext>> {
        session_context(self.scope.cache(), &self.config.session)
    }

    // ========================================================================
    // Mock registration
    // ========================================================================

    /// Create and register a default mock for role `T`
    pub fn create_default_mock<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.scope.registry().create_default_mock::<T>()
    }

    /// Create and register a default mock for role `T` with a hint
    pub fn register_default_mock<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
    ) -> Result<Arc<T>> {
        self.scope.registry().register_default_mock::<T>(hint)
    }

    /// Register an explicitly supplied instance for role `T`
    pub fn register_mock<T: ?Sized + Send + Sync + 'static>(
        &self,
        hint: Option<&str>,
        instance: Arc<T>,
    ) -> Result<()> {
        self.scope.registry().register_mock::<T>(hint, instance)
    }

    /// Current instance for `(T, default hint)`, if any
    pub fn lookup<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        self.scope.registry().lookup::<T>()
    }

    /// The default mock for `T`, created on first access
    pub fn mock_or_default<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.scope.registry().mock_or_default::<T>()
    }

    /// Snapshot of the default mock controls, in insertion order
    pub fn default_mocks(&self) -> Vec<Arc<crate::mock::MockControl>> {
        self.scope.registry().default_mocks()
    }

    // ========================================================================
    // Batch lifecycle
    // ========================================================================

    /// Move the default mock set (and `extras`) into Replay
    pub fn replay_default(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.batch.replay_all(extras)
    }

    /// Verify the default mock set (and `extras`), then reset it
    pub fn verify_default(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.batch.verify_all(extras)
    }

    /// Reset the default mock set (and `extras`) back to Record
    pub fn reset_default(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.batch.reset_all(extras)
    }
}

impl Drop for TestBench {
    fn drop(&mut self) {
        if self.torn_down {
            return;
        }
        if let Err(e) = Scope::end() {
            // teardown failures must never take down the test process
            warn!(error = %e, "scope teardown during bench drop");
        }
    }
}
