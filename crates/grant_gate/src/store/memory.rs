//! In-memory [`PermissionStore`] implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{GroupScope, PermissionStore};
use crate::error::GrantError;
use crate::groups::GroupFilter;
use crate::level::PermissionLevel;
use crate::model::Group;
use crate::options::StoreOptions;
use crate::resource::ResourceKind;

#[derive(Debug, Clone)]
struct Membership {
    group_uuid: String,
    user_id: String,
}

#[derive(Debug, Default)]
struct State {
    /// Insertion order is the search result order
    groups: Vec<Group>,
    memberships: Vec<Membership>,
    owners: HashMap<(ResourceKind, String), String>,
    /// (kind, resource) → [(group uuid, level)]
    grants: HashMap<(ResourceKind, String), Vec<(String, PermissionLevel)>>,
}

impl State {
    fn group(&self, uuid: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.uuid == uuid)
    }

    fn is_member(&self, group: &Group, user_id: &str) -> bool {
        group.owner_id.as_deref() == Some(user_id)
            || self
                .memberships
                .iter()
                .any(|m| m.group_uuid == group.uuid && m.user_id == user_id)
    }

    /// Groups whose grants apply to `user_id`, including the public group
    fn effective_groups<'a>(
        &'a self,
        user_id: Option<&str>,
        public: Option<&'a str>,
    ) -> Vec<&'a str> {
        let mut uuids: Vec<&str> = match user_id {
            Some(user) => self
                .groups
                .iter()
                .filter(|g| self.is_member(g, user))
                .map(|g| g.uuid.as_str())
                .collect(),
            None => Vec::new(),
        };
        if let Some(public) = public {
            if !uuids.contains(&public) {
                uuids.push(public);
            }
        }
        uuids
    }
}

/// Permission store held entirely in memory
///
/// Grant resolution per resource:
///
/// 1. the configured root user has `all`
/// 2. the resource owner has `all`
/// 3. otherwise the maximum grant among groups the actor owns or belongs
///    to, plus the public group (the only group anonymous actors belong to)
/// 4. otherwise `none`
///
/// Cloning is cheap and clones share state.
///
/// # Example
///
/// ```
/// use grant_gate::prelude::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), GrantError> {
/// let store = MemoryStore::new(StoreOptions::default());
/// let group = Group::user_defined("students", "0xalice");
/// store.add_group(group.clone()).await?;
/// store.add_member(&group.uuid, "0xbob").await?;
///
/// let found = store
///     .search_groups(&GroupFilter::Name("students".into()), &GroupScope::Actor("0xbob".into()))
///     .await?;
/// assert_eq!(found, vec![group]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    options: Arc<StoreOptions>,
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options: Arc::new(options),
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    /// Options this store was created with
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Register a group
    ///
    /// # Errors
    ///
    /// [`GrantError::Integrity`] if a group with the same identifier exists.
    pub async fn add_group(&self, group: Group) -> Result<(), GrantError> {
        let mut state = self.state.write().await;
        if state.group(&group.uuid).is_some() {
            return Err(GrantError::Integrity(format!(
                "Duplicate group uuid: {}",
                group.uuid
            )));
        }
        debug!("Adding group {} ({})", group.name, group.uuid);
        state.groups.push(group);
        Ok(())
    }

    /// Add `user_id` to a group as a regular member
    ///
    /// Adding an existing member is a no-op.
    pub async fn add_member(&self, group_uuid: &str, user_id: &str) -> Result<(), GrantError> {
        let mut state = self.state.write().await;
        if state.group(group_uuid).is_none() {
            return Err(GrantError::NotFound {
                description: format!("uuid starting with '{}'", group_uuid),
            });
        }
        let exists = state
            .memberships
            .iter()
            .any(|m| m.group_uuid == group_uuid && m.user_id == user_id);
        if !exists {
            state.memberships.push(Membership {
                group_uuid: group_uuid.to_string(),
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }

    /// Record the owner of a resource
    pub async fn set_owner(&self, kind: ResourceKind, resource_id: &str, owner_id: &str) {
        self.state
            .write()
            .await
            .owners
            .insert((kind, resource_id.to_string()), owner_id.to_string());
    }

    /// Set a group's level on a resource
    ///
    /// Granting [`PermissionLevel::None`] removes the grant.
    pub async fn grant(
        &self,
        group_uuid: &str,
        kind: ResourceKind,
        resource_id: &str,
        level: PermissionLevel,
    ) -> Result<(), GrantError> {
        let mut state = self.state.write().await;
        let known = state.group(group_uuid).is_some()
            || self.options.public_group_id.as_deref() == Some(group_uuid);
        if !known {
            return Err(GrantError::NotFound {
                description: format!("uuid starting with '{}'", group_uuid),
            });
        }
        let entries = state
            .grants
            .entry((kind, resource_id.to_string()))
            .or_default();
        entries.retain(|(uuid, _)| uuid != group_uuid);
        if level > PermissionLevel::None {
            entries.push((group_uuid.to_string(), level));
        }
        debug!(
            "Group {} now has {} on {} {}",
            group_uuid, level, kind, resource_id
        );
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn search_groups(
        &self,
        filter: &GroupFilter,
        scope: &GroupScope,
    ) -> Result<Vec<Group>, GrantError> {
        let state = self.state.read().await;
        let groups: Vec<Group> = state
            .groups
            .iter()
            .filter(|g| filter.matches(g))
            .filter(|g| match scope {
                GroupScope::Global => true,
                GroupScope::Actor(user) => {
                    (g.user_defined && g.owner_id.as_deref() == Some(user.as_str()))
                        || state
                            .memberships
                            .iter()
                            .any(|m| m.group_uuid == g.uuid && m.user_id == *user)
                }
            })
            .cloned()
            .collect();
        Ok(groups)
    }

    async fn user_permissions(
        &self,
        kind: ResourceKind,
        user_id: Option<&str>,
        resource_ids: &[String],
        owner_ids: &HashMap<String, String>,
    ) -> Result<HashMap<String, PermissionLevel>, GrantError> {
        let state = self.state.read().await;
        let is_root = self.options.is_root(user_id);
        let groups = state.effective_groups(user_id, self.options.public_group_id.as_deref());

        let permissions = resource_ids
            .iter()
            .map(|id| {
                let owned = user_id.is_some() && owner_ids.get(id).map(String::as_str) == user_id;
                let level = if is_root || owned {
                    PermissionLevel::All
                } else {
                    state
                        .grants
                        .get(&(kind, id.clone()))
                        .into_iter()
                        .flatten()
                        .filter(|(uuid, _)| groups.contains(&uuid.as_str()))
                        .map(|(_, level)| *level)
                        .max()
                        .unwrap_or_default()
                };
                (id.clone(), level)
            })
            .collect();
        Ok(permissions)
    }

    async fn owner_ids(
        &self,
        kind: ResourceKind,
        resource_ids: &[String],
    ) -> Result<HashMap<String, String>, GrantError> {
        let state = self.state.read().await;
        Ok(resource_ids
            .iter()
            .filter_map(|id| {
                state
                    .owners
                    .get(&(kind, id.clone()))
                    .map(|owner| (id.clone(), owner.clone()))
            })
            .collect())
    }
}
