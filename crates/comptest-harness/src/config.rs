//! Bench configuration
//!
//! Optional TOML-backed settings for the bench itself: session context
//! defaults and extra whitelisted resources for the stub environment.
//! Everything has a working default; most test suites never load a
//! file.
//!
//! ```toml
//! [session]
//! database = "testdb"
//! site = "main"
//! language = "de"
//!
//! [[resources.extra]]
//! name = "skin.properties"
//! path = "tests/resources/skin.properties"
//! ```

use std::path::PathBuf;

use comptest_domain::{Error, Result};
use serde::Deserialize;

/// Top-level bench settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchConfig {
    /// Session context defaults
    #[serde(default)]
    pub session: SessionDefaults,
    /// Stub resource environment settings
    #[serde(default)]
    pub resources: ResourceDefaults,
}

impl BenchConfig {
    /// Parse a TOML document into a config
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw)
            .map_err(|e| Error::configuration_with_source("invalid bench config TOML", e))
    }
}

/// Defaults for the lazily created session context
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Database name the session reports
    pub database: String,
    /// Site name the session reports
    pub site: String,
    /// Language code the session reports
    pub language: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            database: "testdb".to_string(),
            site: "main".to_string(),
            language: "de".to_string(),
        }
    }
}

/// Stub environment resource settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceDefaults {
    /// Additional whitelisted resources beyond the bundled one
    #[serde(default)]
    pub extra: Vec<ExtraResource>,
}

/// One additional whitelisted stub resource
#[derive(Debug, Clone, Deserialize)]
pub struct ExtraResource {
    /// Resource name as requested by code-under-test
    pub name: String,
    /// File the stub serves for that name
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_file() {
        let config = BenchConfig::default();
        assert_eq!(config.session.database, "testdb");
        assert!(config.resources.extra.is_empty());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = BenchConfig::from_toml_str(
            r#"
            [session]
            language = "en"

            [[resources.extra]]
            name = "skin.properties"
            path = "tests/resources/skin.properties"
            "#,
        )
        .unwrap();
        assert_eq!(config.session.language, "en");
        assert_eq!(config.session.database, "testdb");
        assert_eq!(config.resources.extra.len(), 1);
        assert_eq!(config.resources.extra[0].name, "skin.properties");
    }

    #[test]
    fn test_invalid_toml_is_a_configuration_error() {
        let err = BenchConfig::from_toml_str("session = nonsense").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
