//! Permission levels and their total ordering
//!
//! [`PermissionLevel`] is ordered `None < Read < All`. Every check in this
//! crate compares levels with `<`/`>=` and aggregates with `max`/`min`,
//! never with equality.
//!
//! # Example
//!
//! ```
//! use grant_gate::level::PermissionLevel;
//!
//! let level: PermissionLevel = "r".parse().unwrap();
//! assert_eq!(level, PermissionLevel::Read);
//! assert!(level >= PermissionLevel::None);
//! assert!(level < PermissionLevel::All);
//! assert_eq!(level.to_string(), "read");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GrantError;

/// Access tier granted on a resource
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// No access
    #[default]
    None,
    /// May view the resource
    Read,
    /// Full control over the resource
    All,
}

impl PermissionLevel {
    /// Every level, lowest first
    pub const ALL_LEVELS: [PermissionLevel; 3] =
        [PermissionLevel::None, PermissionLevel::Read, PermissionLevel::All];

    /// Human-readable level name
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::None => "none",
            PermissionLevel::Read => "read",
            PermissionLevel::All => "all",
        }
    }

    /// Integer code used by permission tables (0, 1, 2)
    pub fn code(&self) -> u8 {
        match self {
            PermissionLevel::None => 0,
            PermissionLevel::Read => 1,
            PermissionLevel::All => 2,
        }
    }

    /// Decode a stored integer code
    ///
    /// An unknown code means the permission table is corrupt, so this fails
    /// with [`GrantError::Integrity`] rather than a user-facing error.
    pub fn from_code(code: u8) -> Result<Self, GrantError> {
        match code {
            0 => Ok(PermissionLevel::None),
            1 => Ok(PermissionLevel::Read),
            2 => Ok(PermissionLevel::All),
            other => Err(GrantError::Integrity(format!(
                "Unexpected permission code: {}",
                other
            ))),
        }
    }

    /// Whether this level satisfies `required`
    pub fn satisfies(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses any non-empty prefix of `none`, `read` or `all`, ignoring case.
impl FromStr for PermissionLevel {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return Err(GrantError::InvalidPermission(s.to_string()));
        }
        PermissionLevel::ALL_LEVELS
            .into_iter()
            .find(|level| level.as_str().starts_with(&lowered))
            .ok_or_else(|| GrantError::InvalidPermission(s.to_string()))
    }
}
