//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the comptest bench
#[derive(Error, Debug)]
pub enum Error {
    /// A default mock already exists for the addressed component key
    #[error("duplicate mock registration for role '{role}' (hint '{hint}')")]
    DuplicateRegistration {
        /// Role type name of the offending registration
        role: String,
        /// Hint of the offending registration
        hint: String,
    },

    /// Lookup or registration attempted outside an active test scope
    #[error("no active test scope: {message}")]
    NoActiveScope {
        /// Description of the attempted operation
        message: String,
    },

    /// Scope initialization failed or was attempted while already active
    #[error("scope initialization error: {message}")]
    Initialization {
        /// Description of the initialization failure
        message: String,
    },

    /// Stub collaborator queried for an operation it does not support
    #[error("unsupported operation: {message}")]
    UnsupportedOperation {
        /// Description of the unsupported request
        message: String,
    },

    /// Illegal record/replay/verify transition or a failed verification
    #[error("mock state error: {message}")]
    MockState {
        /// Description of the illegal transition or mismatch
        message: String,
    },

    /// No mock factory registered for the requested role
    #[error("no mock factory for role '{role}'; registered roles: {available:?}")]
    MissingMockFactory {
        /// Role type name that was requested
        role: String,
        /// Role type names with registered factories
        available: Vec<String>,
    },

    /// Component resolution failed for a (role, hint) pair
    #[error("unresolved component for role '{role}' (hint '{hint}')")]
    UnresolvedComponent {
        /// Role type name that was requested
        role: String,
        /// Hint that was requested
        hint: String,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal harness error
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

// Registration and scope error creation methods
impl Error {
    /// Create a duplicate registration error
    pub fn duplicate_registration<R: Into<String>, H: Into<String>>(role: R, hint: H) -> Self {
        Self::DuplicateRegistration {
            role: role.into(),
            hint: hint.into(),
        }
    }

    /// Create a no-active-scope error
    pub fn no_active_scope<S: Into<String>>(message: S) -> Self {
        Self::NoActiveScope {
            message: message.into(),
        }
    }

    /// Create an initialization error
    pub fn initialization<S: Into<String>>(message: S) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported_operation<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
        }
    }
}

// Mock lifecycle error creation methods
impl Error {
    /// Create a mock state error
    pub fn mock_state<S: Into<String>>(message: S) -> Self {
        Self::MockState {
            message: message.into(),
        }
    }

    /// Create a missing mock factory error
    pub fn missing_mock_factory<R: Into<String>>(role: R, available: Vec<String>) -> Self {
        Self::MissingMockFactory {
            role: role.into(),
            available,
        }
    }

    /// Create an unresolved component error
    pub fn unresolved_component<R: Into<String>, H: Into<String>>(role: R, hint: H) -> Self {
        Self::UnresolvedComponent {
            role: role.into(),
            hint: hint.into(),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_display() {
        let err = Error::duplicate_registration("dyn DocumentStore", "default");
        let msg = err.to_string();
        assert!(msg.contains("dyn DocumentStore"));
        assert!(msg.contains("default"));
    }

    #[test]
    fn test_missing_factory_lists_available() {
        let err = Error::missing_mock_factory("dyn EventLog", vec!["dyn DocumentStore".into()]);
        assert!(err.to_string().contains("dyn DocumentStore"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }
}
