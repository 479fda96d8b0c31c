//! Whitelisting stub resource environment
//!
//! Installed into every bench scope in place of the real hosting
//! environment. Only a fixed whitelist of named resources resolves;
//! the bundled default serves exactly one name,
//! [`ENGINE_PROPERTIES`], from a file shipped with this crate. Every
//! other name and every non-URL operation fails with
//! `UnsupportedOperation` so tests cannot silently depend on the real
//! environment.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use comptest_domain::{Error, ResourceEnvironment, Result};
use tracing::debug;
use url::Url;

/// The one resource name the bundled stub serves
pub const ENGINE_PROPERTIES: &str = "engine.properties";

/// Stub environment with a fixed resource whitelist
pub struct StubResourceEnvironment {
    resources: HashMap<String, PathBuf>,
}

impl StubResourceEnvironment {
    /// Stub with an empty whitelist; every lookup fails
    pub fn empty() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Stub serving [`ENGINE_PROPERTIES`] from the crate-bundled file
    pub fn bundled() -> Self {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join(ENGINE_PROPERTIES);
        Self::empty().with_resource(ENGINE_PROPERTIES, bundled)
    }

    /// Add one name to the whitelist, served from `path`
    pub fn with_resource(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resources.insert(name.into(), path.into());
        self
    }
}

impl ResourceEnvironment for StubResourceEnvironment {
    fn resource_url(&self, name: &str) -> Result<Url> {
        let path = self.resources.get(name).ok_or_else(|| {
            Error::unsupported_operation(format!(
                "resource '{name}' is not whitelisted in the stub environment"
            ))
        })?;
        debug!(name, path = %path.display(), "serving stub resource");
        Url::from_file_path(path).map_err(|()| {
            Error::internal(format!(
                "stub resource path '{}' is not absolute",
                path.display()
            ))
        })
    }

    fn resource_reader(&self, name: &str) -> Result<Box<dyn Read + Send>> {
        Err(Error::unsupported_operation(format!(
            "stub environment does not open resource streams (requested '{name}')"
        )))
    }

    fn temporary_dir(&self) -> Result<PathBuf> {
        Err(Error::unsupported_operation(
            "stub environment does not provide a temporary directory",
        ))
    }
}

/// Container-resolved slot the bench installs the stub into
///
/// Registered as a singleton by the core config module; code-under-test
/// resolves the host from the container and asks it for the active
/// environment.
#[derive(Default)]
pub struct EnvironmentHost {
    slot: std::sync::RwLock<Option<std::sync::Arc<dyn ResourceEnvironment>>>,
}

impl EnvironmentHost {
    /// Create a host with no environment installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the environment served to code-under-test
    pub fn install(&self, environment: std::sync::Arc<dyn ResourceEnvironment>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(environment);
        }
    }

    /// The installed environment
    pub fn environment(&self) -> Result<std::sync::Arc<dyn ResourceEnvironment>> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.clone())
            .ok_or_else(|| {
                Error::initialization("no resource environment installed in this scope")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_resource_resolves_to_file_url() {
        let env = StubResourceEnvironment::bundled();
        let url = env.resource_url(ENGINE_PROPERTIES).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("engine.properties"));
        assert!(std::fs::metadata(url.to_file_path().unwrap()).is_ok());
    }

    #[test]
    fn test_unknown_resource_is_unsupported() {
        let env = StubResourceEnvironment::bundled();
        let err = env.resource_url("other.properties").unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_streams_and_temp_dir_are_unsupported() {
        let env = StubResourceEnvironment::bundled();
        assert!(matches!(
            env.resource_reader(ENGINE_PROPERTIES).err().unwrap(),
            Error::UnsupportedOperation { .. }
        ));
        assert!(matches!(
            env.temporary_dir().unwrap_err(),
            Error::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn test_environment_host_install_and_read() {
        let host = EnvironmentHost::new();
        assert!(host.environment().is_err());
        host.install(std::sync::Arc::new(StubResourceEnvironment::bundled()));
        let env = host.environment().unwrap();
        assert!(env.resource_url(ENGINE_PROPERTIES).is_ok());
    }

    #[test]
    fn test_extra_whitelisted_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.txt");
        std::fs::write(&path, "payload").unwrap();

        let env = StubResourceEnvironment::empty().with_resource("extra.txt", &path);
        let url = env.resource_url("extra.txt").unwrap();
        assert_eq!(std::fs::read_to_string(url.to_file_path().unwrap()).unwrap(), "payload");
    }
}
