//! Resource kinds that carry permission grants
//!
//! Only two kinds of resource have permission tables: bundles and
//! worksheets. [`ResourceKind`] is a closed enum; string names coming from
//! outside the crate are converted with [`ResourceKind::from_table`], which
//! rejects anything else as an integrity error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GrantError;

/// Kind of resource a permission grant applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Immutable bundle of data or code
    Bundle,
    /// Worksheet that organizes bundles
    Worksheet,
}

impl ResourceKind {
    /// Human-readable kind name, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Bundle => "bundle",
            ResourceKind::Worksheet => "worksheet",
        }
    }

    /// Name of the permission table holding grants for this kind
    pub fn table_name(&self) -> &'static str {
        match self {
            ResourceKind::Bundle => "group_bundle_permission",
            ResourceKind::Worksheet => "group_object_permission",
        }
    }

    /// Resolve a kind or permission-table name
    ///
    /// Accepts `"bundle"`, `"worksheet"` and the matching table names.
    ///
    /// # Errors
    ///
    /// [`GrantError::Integrity`] for any other value. Reaching this error
    /// means a caller passed a table that has no permission semantics.
    pub fn from_table(name: &str) -> Result<Self, GrantError> {
        match name {
            "bundle" | "group_bundle_permission" => Ok(ResourceKind::Bundle),
            "worksheet" | "group_object_permission" => Ok(ResourceKind::Worksheet),
            other => Err(GrantError::Integrity(format!("Unexpected table: {}", other))),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bundle as seen by permission checks: identity only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Bundle identifier
    pub uuid: String,
}

impl Bundle {
    /// Reference a bundle by identifier
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

/// A worksheet as seen by permission checks: identity and owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Worksheet identifier
    pub uuid: String,
    /// Identifier of the owning user
    pub owner_id: String,
}

impl Worksheet {
    /// Reference a worksheet by identifier and owner
    pub fn new(uuid: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            owner_id: owner_id.into(),
        }
    }
}
