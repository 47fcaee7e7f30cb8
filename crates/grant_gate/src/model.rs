//! Actors and groups
//!
//! These records are owned by the data-access layer; this crate only reads
//! them. Identifiers use the `0x` + 32 lowercase hex digit form produced by
//! [`new_uuid`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh identifier in `0x` + 32 hex digit form
///
/// # Example
///
/// ```
/// let id = grant_gate::model::new_uuid();
/// assert!(id.starts_with("0x"));
/// assert_eq!(id.len(), 34);
/// ```
pub fn new_uuid() -> String {
    format!("0x{}", Uuid::new_v4().simple())
}

/// An identified user whose access is being checked
///
/// Anonymous access is expressed as `Option<&Actor>` being `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl Actor {
    /// Create an actor
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named collection of actors that can receive permission grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Globally unique identifier
    pub uuid: String,
    /// Human name, unique within a lookup scope
    pub name: String,
    /// Identifier of the owning actor
    pub owner_id: Option<String>,
    /// `false` for system groups such as "public"
    pub user_defined: bool,
}

impl Group {
    /// Create a user-defined group with a fresh identifier
    pub fn user_defined(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            uuid: new_uuid(),
            name: name.into(),
            owner_id: Some(owner_id.into()),
            user_defined: true,
        }
    }

    /// Create a system group (no owner, not user-defined)
    pub fn system(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            owner_id: None,
            user_defined: false,
        }
    }
}
