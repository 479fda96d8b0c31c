//! Test resource environment contract
//!
//! Code under test may ask its surrounding environment for named
//! resources. In a bench scope that environment is a stub with a fixed
//! whitelist; every operation outside the whitelist fails with
//! [`Error::UnsupportedOperation`] so a test reaching for an
//! unexpected resource fails loudly instead of touching the real
//! environment.
//!
//! [`Error::UnsupportedOperation`]: crate::error::Error::UnsupportedOperation

use std::io::Read;
use std::path::PathBuf;

use url::Url;

use crate::error::Result;

/// Named-resource lookup surface of the hosting environment
pub trait ResourceEnvironment: Send + Sync {
    /// Resolve a named resource to a URL
    fn resource_url(&self, name: &str) -> Result<Url>;

    /// Open a named resource for reading
    fn resource_reader(&self, name: &str) -> Result<Box<dyn Read + Send>>;

    /// A temporary directory provided by the environment
    fn temporary_dir(&self) -> Result<PathBuf>;
}
