//! Data-access abstraction for groups, ownership and grants
//!
//! This module provides the [`PermissionStore`] trait, the only seam between
//! the permission logic and persistent storage. The resolver and gate never
//! touch tables directly; they hand a [`GroupFilter`] or a batch of resource
//! identifiers to the store and interpret the answer.
//!
//! # Default Implementation
//!
//! [`MemoryStore`] keeps everything in memory. It is suitable for tests and
//! for embedding, and defines the reference grant-resolution semantics other
//! implementations should match.
//!
//! # Custom Stores
//!
//! A database-backed store implements the same trait, typically translating
//! [`GroupFilter::like_pattern`] into a `LIKE` clause and answering
//! [`user_permissions`](PermissionStore::user_permissions) with a single
//! joined query per batch.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::GrantError;
use crate::groups::GroupFilter;
use crate::level::PermissionLevel;
use crate::model::Group;
use crate::resource::ResourceKind;

mod memory;

pub use memory::MemoryStore;

/// Which groups a lookup may return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    /// Every group (root/administrative lookups)
    Global,
    /// Only user-defined groups the actor owns, plus groups the actor is a
    /// member of
    Actor(String),
}

impl GroupScope {
    /// `None` searches globally, `Some(id)` restricts to that actor
    pub fn for_user(user_id: Option<&str>) -> Self {
        match user_id {
            Some(id) => GroupScope::Actor(id.to_string()),
            None => GroupScope::Global,
        }
    }
}

/// Abstract data-access layer consulted by permission checks
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; every method takes `&self` and may
/// be called concurrently from many request-handling tasks. Read consistency
/// is whatever the backing storage provides.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Find groups matching `filter` within `scope`
    ///
    /// Results are returned in a stable order, which the resolver preserves
    /// when reporting ambiguous matches.
    async fn search_groups(
        &self,
        filter: &GroupFilter,
        scope: &GroupScope,
    ) -> Result<Vec<Group>, GrantError>;

    /// Effective permission of `user_id` on each resource in one query
    ///
    /// # Arguments
    ///
    /// * `kind` - Which permission table to consult
    /// * `user_id` - Actor identifier, `None` for anonymous access
    /// * `resource_ids` - Resources to evaluate
    /// * `owner_ids` - Owning actor per resource
    ///
    /// # Returns
    ///
    /// A level per resource. Resources missing from the map are treated as
    /// [`PermissionLevel::None`] by callers.
    async fn user_permissions(
        &self,
        kind: ResourceKind,
        user_id: Option<&str>,
        resource_ids: &[String],
        owner_ids: &HashMap<String, String>,
    ) -> Result<HashMap<String, PermissionLevel>, GrantError>;

    /// Owning actor of each resource that exists
    async fn owner_ids(
        &self,
        kind: ResourceKind,
        resource_ids: &[String],
    ) -> Result<HashMap<String, String>, GrantError>;
}
