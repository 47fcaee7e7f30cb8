//! Effective permission computation.

use std::collections::HashMap;
use tracing::trace;

use crate::error::GrantError;
use crate::level::PermissionLevel;
use crate::model::Actor;
use crate::resource::ResourceKind;
use crate::store::PermissionStore;

/// Compute the actor's effective level on each resource
///
/// The store answers the whole batch in one call. Its answer is then
/// normalized so the result contains exactly the requested identifiers:
/// anything the store left out is [`PermissionLevel::None`], and a resource
/// owned by the actor is always [`PermissionLevel::All`].
///
/// An empty batch returns an empty map without consulting the store.
///
/// # Arguments
///
/// * `store` - Data-access layer that joins memberships with grants
/// * `kind` - Permission table to consult
/// * `actor` - Actor being checked, `None` for anonymous access
/// * `resource_ids` - Resources to evaluate
/// * `owner_ids` - Owning actor per resource, supplied by the caller
pub async fn effective_permissions(
    store: &dyn PermissionStore,
    kind: ResourceKind,
    actor: Option<&Actor>,
    resource_ids: &[String],
    owner_ids: &HashMap<String, String>,
) -> Result<HashMap<String, PermissionLevel>, GrantError> {
    if resource_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let user_id = actor.map(|a| a.id.as_str());
    let reported = store
        .user_permissions(kind, user_id, resource_ids, owner_ids)
        .await?;

    let effective: HashMap<String, PermissionLevel> = resource_ids
        .iter()
        .map(|id| {
            let owned = user_id.is_some() && owner_ids.get(id).map(String::as_str) == user_id;
            let level = if owned {
                PermissionLevel::All
            } else {
                reported.get(id).copied().unwrap_or_default()
            };
            (id.clone(), level)
        })
        .collect();
    trace!("Effective {} permissions for {:?}: {:?}", kind, user_id, effective);
    Ok(effective)
}

/// Levels from `permissions` in the order of `resource_ids`
///
/// Missing entries read as [`PermissionLevel::None`].
pub fn levels_in_order(
    resource_ids: &[String],
    permissions: &HashMap<String, PermissionLevel>,
) -> Vec<PermissionLevel> {
    resource_ids
        .iter()
        .map(|id| permissions.get(id).copied().unwrap_or_default())
        .collect()
}
