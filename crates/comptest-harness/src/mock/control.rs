//! Per-mock lifecycle control handle

use std::sync::Mutex;

use comptest_domain::{Error, MockController, MockPhase, Result};
use tracing::debug;

/// Lifecycle control for one mock instance
///
/// Mock implementations hold a shared `Arc<MockControl>` and report
/// every interaction through [`touch`](MockControl::touch). While the
/// control is in Record phase an interaction is scripted as an
/// expectation; in Replay phase it is matched against the script and
/// an unexpected interaction fails immediately.
#[derive(Debug)]
pub struct MockControl {
    label: String,
    state: Mutex<ControlState>,
}

#[derive(Debug)]
struct ControlState {
    phase: MockPhase,
    expected: Vec<String>,
    actual: Vec<String>,
}

impl MockControl {
    /// Create a control in Record phase
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: Mutex::new(ControlState {
                phase: MockPhase::Record,
                expected: Vec::new(),
                actual: Vec::new(),
            }),
        }
    }

    /// Report one interaction with the mock
    ///
    /// Record phase: scripts `op` as an expectation. Replay phase:
    /// matches `op` against the next scripted expectation and fails
    /// with [`Error::MockState`] on divergence. Verified phase: always
    /// an error, the mock must be reset first.
    pub fn touch(&self, op: &str) -> Result<()> {
        let mut state = self.lock()?;
        match state.phase {
            MockPhase::Record => {
                state.expected.push(op.to_string());
                Ok(())
            }
            MockPhase::Replay => {
                let position = state.actual.len();
                match state.expected.get(position) {
                    Some(expected) if expected == op => {
                        state.actual.push(op.to_string());
                        Ok(())
                    }
                    Some(expected) => Err(Error::mock_state(format!(
                        "unexpected invocation '{op}' on mock '{}' (expected '{expected}')",
                        self.label
                    ))),
                    None => Err(Error::mock_state(format!(
                        "unexpected invocation '{op}' on mock '{}' (no further interactions expected)",
                        self.label
                    ))),
                }
            }
            MockPhase::Verified => Err(Error::mock_state(format!(
                "invocation '{op}' on verified mock '{}'",
                self.label
            ))),
        }
    }

    /// Number of scripted expectations
    pub fn expected_len(&self) -> usize {
        self.state.lock().map(|s| s.expected.len()).unwrap_or(0)
    }

    /// Number of matched invocations so far
    pub fn actual_len(&self) -> usize {
        self.state.lock().map(|s| s.actual.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ControlState>> {
        self.state
            .lock()
            .map_err(|_| Error::internal(format!("mock control '{}' lock poisoned", self.label)))
    }
}

impl MockController for MockControl {
    fn label(&self) -> &str {
        &self.label
    }

    fn phase(&self) -> MockPhase {
        self.state
            .lock()
            .map(|s| s.phase)
            .unwrap_or(MockPhase::Record)
    }

    fn replay(&self) -> Result<()> {
        let mut state = self.lock()?;
        if state.phase != MockPhase::Record {
            return Err(Error::mock_state(format!(
                "replay on mock '{}' in {} phase (reset required)",
                self.label,
                state.phase.as_str()
            )));
        }
        debug!(mock = %self.label, expectations = state.expected.len(), "mock entering replay");
        state.phase = MockPhase::Replay;
        Ok(())
    }

    fn verify(&self) -> Result<()> {
        let mut state = self.lock()?;
        if state.phase != MockPhase::Replay {
            return Err(Error::mock_state(format!(
                "verify on mock '{}' in {} phase",
                self.label,
                state.phase.as_str()
            )));
        }
        if state.actual.len() < state.expected.len() {
            let missing = &state.expected[state.actual.len()];
            return Err(Error::mock_state(format!(
                "missing invocation '{missing}' on mock '{}' ({} of {} expected interactions seen)",
                self.label,
                state.actual.len(),
                state.expected.len()
            )));
        }
        debug!(mock = %self.label, "mock verified");
        state.phase = MockPhase::Verified;
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.phase = MockPhase::Record;
        state.expected.clear();
        state.actual.clear();
        Ok(())
    }
}
