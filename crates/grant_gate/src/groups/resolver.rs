//! Turning a specifier into exactly one group.

use tracing::debug;

use super::specifier::GroupFilter;
use crate::error::GrantError;
use crate::model::Group;
use crate::store::{GroupScope, PermissionStore};

/// Resolve `spec` to a single group visible in `scope`
///
/// The specifier is classified by shape (see [`GroupFilter::classify`]),
/// the lookup is executed by the store, and the result must contain exactly
/// one group.
///
/// # Errors
///
/// - [`GrantError::InvalidSpecifier`] if `spec` is empty
/// - [`GrantError::InvalidName`] if `spec` is treated as a name but is not a
///   legal one
/// - [`GrantError::NotFound`] if nothing matched
/// - [`GrantError::AmbiguousSpecifier`] if several groups matched; the
///   error lists their identifiers in lookup order
/// - any error reported by the store
pub async fn resolve_group(
    store: &dyn PermissionStore,
    spec: &str,
    scope: &GroupScope,
) -> Result<Group, GrantError> {
    let filter = GroupFilter::classify(spec)?;
    let mut groups = store.search_groups(&filter, scope).await?;
    debug!(
        "Group spec {:?} matched {} group(s) in {:?}",
        spec,
        groups.len(),
        scope
    );

    match groups.len() {
        0 => Err(GrantError::NotFound {
            description: filter.description(),
        }),
        1 => Ok(groups.remove(0)),
        _ => Err(GrantError::AmbiguousSpecifier {
            description: filter.description(),
            uuids: groups.into_iter().map(|g| g.uuid).collect(),
        }),
    }
}

/// Resolve `spec` among the groups `user_id` is involved in
///
/// With `user_id` set, only user-defined groups the user owns and groups
/// the user is a member of are searched. With `None` every group is
/// searched, which is the administrative path.
pub async fn unique_group(
    store: &dyn PermissionStore,
    spec: &str,
    user_id: Option<&str>,
) -> Result<Group, GrantError> {
    resolve_group(store, spec, &GroupScope::for_user(user_id)).await
}
