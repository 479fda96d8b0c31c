//! Role and component key types
//!
//! A *role* is the abstract component type a consumer asks the
//! container to resolve, addressed by the `TypeId` of its trait object
//! (e.g. `dyn DocumentStore`). A *hint* disambiguates multiple
//! implementations of the same role; an absent hint is normalized to
//! [`DEFAULT_HINT`]. Keys are plain value types so the registry and
//! container stay statically checkable, with no reflection involved.

use std::any::TypeId;
use std::fmt;

/// Reserved hint used when a registration or lookup carries no hint
pub const DEFAULT_HINT: &str = "default";

/// Identifier for a component role type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl RoleKey {
    /// Create the key for a role type (usually a `dyn Trait`)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The role's `TypeId`
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human-readable role type name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Addressable key for one component: a role plus a normalized hint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    role: RoleKey,
    hint: String,
}

impl ComponentKey {
    /// Create a key from a role and an optional hint
    ///
    /// An absent hint is equivalent to [`DEFAULT_HINT`].
    pub fn new(role: RoleKey, hint: Option<&str>) -> Self {
        Self {
            role,
            hint: hint.unwrap_or(DEFAULT_HINT).to_string(),
        }
    }

    /// Create the default-hint key for a role type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(RoleKey::of::<T>(), None)
    }

    /// Create a key for a role type with an explicit hint
    pub fn of_hint<T: ?Sized + 'static>(hint: &str) -> Self {
        Self::new(RoleKey::of::<T>(), Some(hint))
    }

    /// The role part of the key
    pub fn role(&self) -> RoleKey {
        self.role
    }

    /// The normalized hint part of the key
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (hint '{}')", self.role, self.hint)
    }
}
