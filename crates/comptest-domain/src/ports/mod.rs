//! Domain Port Interfaces
//!
//! Boundary contracts between the harness and its collaborators.
//! The domain defines the interfaces; the harness crate (and test
//! code) implements them:
//!
//! - **config** - container wiring contracts (`ConfigModule`,
//!   `ComponentRegistrar`)
//! - **mock** - the mocking collaborator contract (`MockController`,
//!   `MockPhase`)
//! - **environment** - the test resource environment contract
//!   (`ResourceEnvironment`)

pub mod config;
pub mod environment;
pub mod mock;

// Re-export commonly used port traits for convenience
pub use config::{ComponentRegistrar, ComponentRegistrarExt, ConfigModule};
pub use environment::ResourceEnvironment;
pub use mock::{MockController, MockPhase};
