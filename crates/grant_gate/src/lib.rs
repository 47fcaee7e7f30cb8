//! grant_gate - group-based permission checks for bundles and worksheets
//!
//! This crate decides whether an actor may read or fully control a resource,
//! based on resource ownership and per-group permission grants. It also
//! resolves human-entered group specifiers to exactly one group.
//!
//! # Overview
//!
//! - Permission levels ordered `none < read < all`
//! - Effective permission aggregation across ownership and group grants
//! - All-or-nothing batch checks with structured denial errors
//! - Group lookup by full identifier, identifier prefix, or name
//!
//! Storage is pluggable: everything goes through the
//! [`PermissionStore`](store::PermissionStore) trait. [`MemoryStore`](store::MemoryStore)
//! is a complete in-memory implementation.
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//! - `level`: Permission levels and their ordering
//! - `resource`: Resource kinds with permission tables
//! - `model`: Actors and groups
//! - `groups`: Group specifier resolution
//! - `permissions`: Aggregation and enforcement
//! - `store`: Data-access trait and in-memory store
//! - `options`: Store configuration
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```rust
//! use grant_gate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GrantError> {
//!     let store = MemoryStore::default();
//!     let alice = Actor::new("0xa11ce", "alice");
//!
//!     let lab = Group::user_defined("lab", "0xb0b");
//!     store.add_group(lab.clone()).await?;
//!     store.add_member(&lab.uuid, &alice.id).await?;
//!     store.set_owner(ResourceKind::Bundle, "0xdata", "0xb0b").await;
//!     store.grant(&lab.uuid, ResourceKind::Bundle, "0xdata", PermissionLevel::Read).await?;
//!
//!     let gate = PermissionGate::builder().store(store).build();
//!
//!     let group = gate.unique_group("lab", Some(&alice.id)).await?;
//!     assert_eq!(group.uuid, lab.uuid);
//!
//!     gate.require_read_on_bundles(Some(&alice), &["0xdata".to_string()]).await?;
//!     assert!(!gate.can_run(Some(&alice), &Bundle::new("0xdata")).await?);
//!     Ok(())
//! }
//! ```
//!
//! # License
//!
//! Licensed under MIT. See LICENSE file for details.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types and utilities
///
/// This module defines the `GrantError` enum and the `PermissionDenied`
/// payload carried by authorization failures.
pub mod error;

/// Permission levels
///
/// `PermissionLevel` is totally ordered `None < Read < All` and parses from
/// any prefix of its name.
pub mod level;

/// Resource kinds and resource references
pub mod resource;

/// Actors, groups and identifier generation
pub mod model;

/// Group specifier resolution
///
/// Key items:
/// - `resolve_group` - Resolve a specifier within a scope
/// - `unique_group` - Resolve among the groups a user is involved in
/// - `GroupFilter` - The lookup request a specifier classifies into
pub mod groups;

/// Permission aggregation and enforcement
///
/// See `PermissionGate` for the main entry point.
pub mod permissions;

/// Data-access abstraction
///
/// This module provides the `PermissionStore` trait and `MemoryStore`, its
/// in-memory implementation.
pub mod store;

/// Configuration options and builder
pub mod options;

// Prelude module for common imports
pub mod prelude {
    //! Common imports for grant_gate users
    //!
    //! Use `use grant_gate::prelude::*;` to import commonly used types.

    pub use crate::error::{GrantError, PermissionDenied};
    pub use crate::groups::{GroupFilter, resolve_group, unique_group};
    pub use crate::level::PermissionLevel;
    pub use crate::model::{Actor, Group, new_uuid};
    pub use crate::options::StoreOptions;
    pub use crate::permissions::{PermissionGate, effective_permissions};
    pub use crate::resource::{Bundle, ResourceKind, Worksheet};
    pub use crate::store::{GroupScope, MemoryStore, PermissionStore};
}
