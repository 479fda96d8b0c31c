//! Mocking collaborator contract
//!
//! The bench delegates mock lifecycle mechanics to a collaborator that
//! exposes one control handle per mock. Each handle carries its own
//! explicit state machine:
//!
//! ```text
//! Record ──replay()──▶ Replay ──verify()──▶ Verified
//!    ▲                    │                     │
//!    └───────reset()──────┴───────reset()───────┘
//! ```
//!
//! Illegal transitions (e.g. a second `replay()` without an
//! intervening `reset()`) fail with [`Error::MockState`] from the
//! collaborator itself; the bench's batch operations only fan calls
//! out over the handles and never paper over such errors.
//!
//! [`Error::MockState`]: crate::error::Error::MockState

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Phase of one mock's record/replay/verify lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MockPhase {
    /// Accepting expected interactions
    Record,
    /// Accepting real invocations from code-under-test
    Replay,
    /// Expectations confirmed; only a reset leaves this phase
    Verified,
}

impl MockPhase {
    /// Lowercase phase name, for diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            MockPhase::Record => "record",
            MockPhase::Replay => "replay",
            MockPhase::Verified => "verified",
        }
    }
}

/// Per-mock lifecycle control handle
pub trait MockController: Send + Sync {
    /// Diagnostic label, usually the mocked role's type name
    fn label(&self) -> &str;

    /// Current lifecycle phase
    fn phase(&self) -> MockPhase;

    /// Transition Record → Replay
    fn replay(&self) -> Result<()>;

    /// Confirm recorded expectations; transition Replay → Verified
    fn verify(&self) -> Result<()>;

    /// Discard scripts and return to Record from any phase
    fn reset(&self) -> Result<()>;
}
