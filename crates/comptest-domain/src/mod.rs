//! # Domain Layer
//!
//! Core types and boundary contracts for the comptest bench.
//!
//! This crate carries no harness logic. It defines:
//!
//! - the error taxonomy ([`error::Error`], [`error::Result`]),
//! - the role/hint key types used to address components
//!   ([`role::RoleKey`], [`role::ComponentKey`]),
//! - the port traits implemented by the harness and its collaborators
//!   ([`ports`]).
//!
//! Ports follow the Dependency Inversion Principle: the domain defines
//! the interfaces, the harness crate implements them.

pub mod error;
pub mod ports;
pub mod role;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::{
    ComponentRegistrar, ComponentRegistrarExt, ConfigModule, MockController, MockPhase,
    ResourceEnvironment,
};
pub use role::{ComponentKey, RoleKey, DEFAULT_HINT};
