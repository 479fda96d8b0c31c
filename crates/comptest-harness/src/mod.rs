//! # Scoped Test Bench
//!
//! A throwaway dependency-injection container per test case, with
//! auto-supplied default mocks and batch record/replay/verify
//! lifecycle control.
//!
//! ## Module Categories
//!
//! ### Scope & Container
//! | Module | Description |
//! |--------|-------------|
//! | [`scope`] | Per-test scope and its thread-local lifecycle holder |
//! | [`container`] | DI container, builder and typed resolution |
//!
//! ### Mocks
//! | Module | Description |
//! |--------|-------------|
//! | [`mock`] | Mock engine: factory table, control handles, phase FSM |
//! | [`registry`] | (role, hint) mock registry and the default mock set |
//! | [`batch`] | Batch replay/verify/reset over the default mock set |
//!
//! ### Test Environment
//! | Module | Description |
//! |--------|-------------|
//! | [`env`] | Whitelisting stub resource environment |
//! | [`session`] | Lazily cached per-test session context |
//! | [`cache`] | Scope-owned lazy keyed cache |
//!
//! ### Glue
//! | Module | Description |
//! |--------|-------------|
//! | [`bench`] | `TestBench` composition root (set_up / tear_down) |
//! | [`config`] | Bench configuration (TOML) |
//! | [`logging`] | Tracing setup for test runs |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let bench = TestBench::with_defaults(vec![])?;
//! let store = bench.create_default_mock::<dyn DocumentStore>()?;
//! bench.replay_default(&[])?;
//! // ... exercise code-under-test, which resolves dyn DocumentStore
//! bench.verify_default(&[])?;
//! bench.tear_down()?;
//! ```

pub mod batch;
pub mod bench;
pub mod cache;
pub mod config;
pub mod container;
pub mod env;
pub mod logging;
pub mod mock;
pub mod registry;
pub mod scope;
pub mod session;

// Re-export commonly used types
pub use batch::BatchController;
pub use bench::{CoreConfigModule, TestBench};
pub use cache::ExecutionCache;
pub use comptest_domain::{
    ComponentKey, ComponentRegistrar, ComponentRegistrarExt, ConfigModule, Error, MockController,
    MockPhase, ResourceEnvironment, Result, RoleKey, DEFAULT_HINT,
};
pub use config::{BenchConfig, SessionDefaults};
pub use container::{Container, ContainerBuilder};
pub use env::{EnvironmentHost, StubResourceEnvironment, ENGINE_PROPERTIES};
pub use logging::init_test_logging;
pub use mock::{MockControl, MockEngine, MockFactoryEntry, MOCK_FACTORIES};
pub use registry::MockRegistry;
pub use scope::Scope;
pub use session::SessionContext;
