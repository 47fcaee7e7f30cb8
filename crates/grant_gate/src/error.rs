//! Error types for grant_gate
//!
//! This module defines the error hierarchy for the grant_gate crate using `thiserror`.
//! All operations that can fail return `Result<T, GrantError>`.
//!
//! # Error Variants
//!
//! - [`GrantError::InvalidSpecifier`]: Empty or malformed group specifier
//! - [`GrantError::InvalidName`]: Specifier looks like a name but breaks naming rules
//! - [`GrantError::InvalidPermission`]: Unparseable permission level string
//! - [`GrantError::NotFound`]: No group matched a specifier
//! - [`GrantError::AmbiguousSpecifier`]: More than one group matched a specifier
//! - [`GrantError::Integrity`]: Unknown resource kind or corrupt level code (caller bug)
//! - [`GrantError::Permission`]: Actor lacks the required level on some resource
//! - [`GrantError::Store`]: Failure reported by the data-access layer
//! - [`GrantError::Config`]: Malformed configuration (auto-converts from `serde_json::Error`)
//!
//! # Example
//!
//! ```rust
//! use grant_gate::error::GrantError;
//!
//! fn example(spec: &str) -> Result<(), GrantError> {
//!     if spec.is_empty() {
//!         return Err(GrantError::InvalidSpecifier(
//!             "Tried to expand empty group_spec!".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(example("").is_err());
//! ```

use thiserror::Error;

use crate::level::PermissionLevel;
use crate::model::Actor;
use crate::resource::ResourceKind;

/// The main error type for all grant_gate operations
///
/// Caller-input errors (`InvalidSpecifier`, `InvalidName`, `InvalidPermission`,
/// `NotFound`, `AmbiguousSpecifier`) carry enough context to be shown to a
/// user as-is. `Integrity` signals a programming defect in the caller and
/// should be treated as fatal. `Permission` is an authorization denial.
#[derive(Error, Debug)]
pub enum GrantError {
    /// Group specifier was empty or otherwise unusable
    #[error("Invalid group specifier: {0}")]
    InvalidSpecifier(String),

    /// Specifier was classified as a name but violates the naming rules
    ///
    /// Names must start with a letter or underscore and contain only
    /// letters, digits, `_`, `.` and `-`.
    #[error(
        "Invalid name: '{name}'. Names must start with a letter or underscore and contain only letters, digits, '_', '.' or '-'"
    )]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// A permission string did not match `none`, `read` or `all`
    #[error("Invalid permission flag specified ({0})")]
    InvalidPermission(String),

    /// No group matched the specifier
    #[error("Found no group with {description}")]
    NotFound {
        /// What was searched for, e.g. `name 'students'`
        description: String,
    },

    /// More than one group matched the specifier
    ///
    /// `uuids` lists every candidate in the order the data-access layer
    /// returned them so the caller can ask the user to disambiguate.
    #[error("Found multiple groups with {description}:{}", list_uuids(.uuids))]
    AmbiguousSpecifier {
        /// What was searched for, e.g. `uuid starting with '0x12'`
        description: String,
        /// Identifiers of all matching groups, in lookup order
        uuids: Vec<String>,
    },

    /// Internal inconsistency: unknown resource kind, corrupt level code
    ///
    /// This indicates a bug in the caller, never a user-facing condition.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The actor lacks the required permission level
    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    /// The data-access layer failed to answer a query
    #[error("Data access error: {0}")]
    Store(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GrantError {
    /// Whether this error is an authorization denial
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, GrantError::Permission(_))
    }
}

fn list_uuids(uuids: &[String]) -> String {
    uuids.iter().map(|uuid| format!("\n  uuid={}", uuid)).collect()
}

/// Details of a failed batch permission check
///
/// Every field is kept structured so a boundary layer can render its own
/// message; the `Display` form is the canonical human-readable one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "User {} does not have sufficient permissions on {kind} {} (have {}, need {need}).",
    describe_actor(.actor),
    join_ids(.resource_ids),
    join_levels(.have)
)]
pub struct PermissionDenied {
    /// The actor that was checked, `None` for anonymous access
    pub actor: Option<Actor>,
    /// Kind of the requested resources
    pub kind: ResourceKind,
    /// Requested resource identifiers, in request order
    pub resource_ids: Vec<String>,
    /// Effective level per requested resource, in request order
    pub have: Vec<PermissionLevel>,
    /// Level the caller required on every resource
    pub need: PermissionLevel,
}

impl PermissionDenied {
    /// Resource ids whose effective level falls short of the requirement
    pub fn insufficient(&self) -> impl Iterator<Item = (&str, PermissionLevel)> {
        self.resource_ids
            .iter()
            .zip(self.have.iter().copied())
            .filter(|(_, level)| *level < self.need)
            .map(|(id, level)| (id.as_str(), level))
    }
}

fn describe_actor(actor: &Option<Actor>) -> String {
    match actor {
        Some(actor) => format!("{}({})", actor.name, actor.id),
        None => "<anonymous>".to_string(),
    }
}

fn join_ids(ids: &[String]) -> String {
    ids.join(" ")
}

fn join_levels(levels: &[PermissionLevel]) -> String {
    levels
        .iter()
        .map(PermissionLevel::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied(actor: Option<Actor>) -> PermissionDenied {
        PermissionDenied {
            actor,
            kind: ResourceKind::Bundle,
            resource_ids: vec!["0xaaa".to_string(), "0xbbb".to_string()],
            have: vec![PermissionLevel::All, PermissionLevel::Read],
            need: PermissionLevel::All,
        }
    }

    #[test]
    fn test_invalid_specifier_message() {
        let err = GrantError::InvalidSpecifier("Tried to expand empty group_spec!".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid group specifier: Tried to expand empty group_spec!"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = GrantError::NotFound {
            description: "name 'students'".to_string(),
        };
        assert_eq!(err.to_string(), "Found no group with name 'students'");
    }

    #[test]
    fn test_ambiguous_message_lists_every_uuid() {
        let err = GrantError::AmbiguousSpecifier {
            description: "uuid starting with '0x1'".to_string(),
            uuids: vec!["0x1a".to_string(), "0x1b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Found multiple groups with uuid starting with '0x1':\n  uuid=0x1a\n  uuid=0x1b"
        );
    }

    #[test]
    fn test_invalid_name_mentions_name() {
        let err = GrantError::InvalidName {
            name: "9lives".to_string(),
        };
        assert!(err.to_string().contains("'9lives'"));
    }

    #[test]
    fn test_permission_denied_message_named_actor() {
        let actor = Actor::new("0xu1", "alice");
        let err: GrantError = denied(Some(actor)).into();
        assert_eq!(
            err.to_string(),
            "User alice(0xu1) does not have sufficient permissions on bundle 0xaaa 0xbbb (have all read, need all)."
        );
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_permission_denied_message_anonymous() {
        let err = denied(None);
        assert!(err.to_string().starts_with("User <anonymous> does not"));
    }

    #[test]
    fn test_insufficient_lists_short_resources() {
        let err = denied(None);
        let short: Vec<_> = err.insufficient().collect();
        assert_eq!(short, vec![("0xbbb", PermissionLevel::Read)]);
    }

    #[test]
    fn test_integrity_is_not_permission_denied() {
        let err = GrantError::Integrity("Unexpected table: users".to_string());
        assert!(!err.is_permission_denied());
        assert!(err.to_string().contains("Unexpected table: users"));
    }

    #[test]
    fn test_json_error_conversion() {
        fn parse() -> Result<serde_json::Value, GrantError> {
            Ok(serde_json::from_str("{ invalid }")?)
        }

        let err = parse().unwrap_err();
        assert!(matches!(err, GrantError::Config(_)));
    }
}
