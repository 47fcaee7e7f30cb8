//! Classification of human-entered group specifiers
//!
//! A specifier is tried against each shape in order and the first match
//! decides the lookup:
//!
//! 1. full identifier (`0x` + 32 hex digits): exact identifier lookup
//! 2. identifier prefix (`0x` + 1..=31 hex digits): prefix lookup
//! 3. anything else: must be a valid name, exact name lookup
//!
//! The result is a [`GroupFilter`], a plain value the data-access layer
//! executes. Adding a shape means adding a variant here; the resolver's
//! zero/one/many handling does not change.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::GrantError;
use crate::model::Group;

static UUID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-f]{32}$").unwrap());

static UUID_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-f]{1,31}$").unwrap());

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.\-]*$").unwrap());

/// Whether `s` is a complete identifier
pub fn is_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

/// Whether `s` is a strict prefix of some identifier
pub fn is_uuid_prefix(s: &str) -> bool {
    UUID_PREFIX_RE.is_match(s)
}

/// Validate a name against the naming rules
///
/// # Errors
///
/// [`GrantError::InvalidName`] if `name` does not start with a letter or
/// underscore, or contains characters other than letters, digits, `_`,
/// `.` and `-`.
pub fn check_name(name: &str) -> Result<(), GrantError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(GrantError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// A group lookup request produced from a specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFilter {
    /// Identifier equals the value
    Uuid(String),
    /// Identifier starts with the value
    UuidPrefix(String),
    /// Name equals the value
    Name(String),
}

impl GroupFilter {
    /// Classify a specifier into a lookup request
    ///
    /// # Errors
    ///
    /// - [`GrantError::InvalidSpecifier`] if `spec` is empty
    /// - [`GrantError::InvalidName`] if `spec` falls through to the name
    ///   shape but is not a legal name
    pub fn classify(spec: &str) -> Result<Self, GrantError> {
        if spec.is_empty() {
            return Err(GrantError::InvalidSpecifier(
                "Tried to expand empty group_spec!".to_string(),
            ));
        }

        let filter = if is_uuid(spec) {
            GroupFilter::Uuid(spec.to_string())
        } else if is_uuid_prefix(spec) {
            GroupFilter::UuidPrefix(spec.to_string())
        } else {
            check_name(spec)?;
            GroupFilter::Name(spec.to_string())
        };
        trace!("Classified group spec {:?} as {:?}", spec, filter);
        Ok(filter)
    }

    /// Description of what this filter searches for, used in errors
    pub fn description(&self) -> String {
        match self {
            GroupFilter::Uuid(value) | GroupFilter::UuidPrefix(value) => {
                format!("uuid starting with '{}'", value)
            }
            GroupFilter::Name(value) => format!("name '{}'", value),
        }
    }

    /// SQL `LIKE` pattern for prefix lookups, `None` for exact filters
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            GroupFilter::UuidPrefix(prefix) => Some(format!("{}%", prefix)),
            _ => None,
        }
    }

    /// Whether `group` satisfies this filter
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            GroupFilter::Uuid(uuid) => group.uuid == *uuid,
            GroupFilter::UuidPrefix(prefix) => group.uuid.starts_with(prefix.as_str()),
            GroupFilter::Name(name) => group.name == *name,
        }
    }
}
