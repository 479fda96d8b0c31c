//! Mock Engine
//!
//! The bundled mocking collaborator. Every mock created through the
//! engine is paired with a [`MockControl`] handle that owns that
//! mock's record/replay/verify state machine; the registry and batch
//! controller only ever talk to the handles through the
//! [`MockController`](comptest_domain::MockController) port.
//!
//! ## Factory Registration Flow
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  1. Mock impl defines:  #[linkme::distributed_slice(            │
//! │                             MOCK_FACTORIES)]                    │
//! │                         static ENTRY: MockFactoryEntry = ...    │
//! │                              ↓                                  │
//! │  2. Engine seeds table: MockEngine::with_registered()           │
//! │                              ↓                                  │
//! │  3. Registry asks:      engine.create_mock::<dyn Store>()       │
//! │                              ↓                                  │
//! │  4. Table builds:       (Arc<dyn Store>, Arc<MockControl>)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Factories are explicit functions registered in a typed table keyed
//! by the role's `TypeId`; there is no reflective mock construction.

pub mod control;
pub mod engine;

pub use control::MockControl;
pub use engine::{MockEngine, MockFactoryEntry, MOCK_FACTORIES};
