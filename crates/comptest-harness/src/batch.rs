//! Batch lifecycle control over the default mock set
//!
//! Walks the scope's default mocks (plus any extra controls the test
//! supplies) and drives them through one lifecycle transition as a
//! single operation. Controls are visited in insertion order, but each
//! mock's own state machine is the unit of truth; correctness never
//! depends on the ordering.

use std::sync::Arc;

use comptest_domain::{MockController, Result};
use tracing::debug;

use crate::registry::MockRegistry;

/// Drives the default mock set through record/replay/verify as a batch
pub struct BatchController {
    registry: Arc<MockRegistry>,
}

impl BatchController {
    /// Create a controller over the given registry's default set
    pub fn new(registry: Arc<MockRegistry>) -> Self {
        Self { registry }
    }

    /// Transition every default mock (and `extras`) into Replay
    ///
    /// Call once per test before exercising code-under-test. A second
    /// call without an intervening reset fails with the collaborator's
    /// own state error; the first failure aborts the batch.
    pub fn replay_all(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.each("replay", extras, |control| control.replay())
    }

    /// Verify every default mock (and `extras`), then reset it
    ///
    /// The per-mock verify asserts the recorded script was played back
    /// completely; the follow-up reset returns the mock to Record so
    /// the set can be scripted again within the same test.
    pub fn verify_all(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.each("verify", extras, |control| {
            control.verify()?;
            control.reset()
        })
    }

    /// Reset every default mock (and `extras`) back to Record
    pub fn reset_all(&self, extras: &[Arc<dyn MockController>]) -> Result<()> {
        self.each("reset", extras, |control| control.reset())
    }

    fn each<F>(&self, op: &str, extras: &[Arc<dyn MockController>], apply: F) -> Result<()>
    where
        F: Fn(&dyn MockController) -> Result<()>,
    {
        let defaults = self.registry.default_mocks();
        debug!(
            op,
            defaults = defaults.len(),
            extras = extras.len(),
            "batch mock transition"
        );
        for control in &defaults {
            apply(control.as_ref())?;
        }
        for control in extras {
            apply(control.as_ref())?;
        }
        Ok(())
    }
}
