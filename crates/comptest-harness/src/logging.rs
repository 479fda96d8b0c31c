//! Tracing setup for test runs
//!
//! Thin wrapper over `tracing-subscriber` scoped to what a test
//! library needs: an env-filtered fmt subscriber writing through the
//! test capture writer. Initialization is idempotent so every test can
//! call it without coordinating.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling bench log verbosity
pub const LOG_ENV_VAR: &str = "COMPTEST_LOG";

/// Install the test subscriber if none is installed yet
///
/// Reads the filter from `COMPTEST_LOG` (default `info`). Safe to call
/// from every test; repeat calls are no-ops.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_initialization_is_harmless() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("logging initialized twice without panicking");
    }
}
