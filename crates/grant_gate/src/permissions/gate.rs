//! Permission gate: batch threshold checks and kind-specific wrappers.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::aggregate::{effective_permissions, levels_in_order};
use crate::error::{GrantError, PermissionDenied};
use crate::groups;
use crate::level::PermissionLevel;
use crate::model::{Actor, Group};
use crate::options::StoreOptions;
use crate::resource::{Bundle, ResourceKind, Worksheet};
use crate::store::{GroupScope, MemoryStore, PermissionStore};

/// Enforcement surface for bundle and worksheet permissions
///
/// Every check is a stateless query against the store: nothing is cached
/// and nothing is written. A gate is cheap to clone and safe to share
/// between tasks.
///
/// # Examples
///
/// ```rust
/// use grant_gate::prelude::*;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), GrantError> {
/// let store = MemoryStore::default();
/// store.set_owner(ResourceKind::Bundle, "0xb1", "0xalice").await;
///
/// let gate = PermissionGate::new(Arc::new(store));
/// let alice = Actor::new("0xalice", "alice");
/// let bob = Actor::new("0xbob", "bob");
///
/// gate.require_all_on_bundles(Some(&alice), &["0xb1".to_string()]).await?;
/// assert!(!gate.can_run(Some(&bob), &Bundle::new("0xb1")).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PermissionGate {
    store: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate").finish_non_exhaustive()
    }
}

impl PermissionGate {
    /// Create a gate over `store`
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// Create a new builder for configuring a gate
    pub fn builder() -> PermissionGateBuilder {
        PermissionGateBuilder::default()
    }

    /// The underlying data-access layer
    pub fn store(&self) -> &dyn PermissionStore {
        self.store.as_ref()
    }

    /// Resolve a group specifier within `scope`
    ///
    /// See [`groups::resolve_group`].
    pub async fn resolve_group(
        &self,
        spec: &str,
        scope: &GroupScope,
    ) -> Result<Group, GrantError> {
        groups::resolve_group(self.store(), spec, scope).await
    }

    /// Resolve a group specifier among the groups `user_id` is involved in
    ///
    /// See [`groups::unique_group`].
    pub async fn unique_group(
        &self,
        spec: &str,
        user_id: Option<&str>,
    ) -> Result<Group, GrantError> {
        groups::unique_group(self.store(), spec, user_id).await
    }

    /// The actor's effective level on each resource
    ///
    /// See [`effective_permissions`](super::effective_permissions).
    pub async fn effective_permissions(
        &self,
        kind: ResourceKind,
        actor: Option<&Actor>,
        resource_ids: &[String],
        owner_ids: &HashMap<String, String>,
    ) -> Result<HashMap<String, PermissionLevel>, GrantError> {
        effective_permissions(self.store(), kind, actor, resource_ids, owner_ids).await
    }

    /// Require at least `required` on every resource in the batch
    ///
    /// The check is all-or-nothing: it succeeds only if the lowest effective
    /// level across the batch satisfies `required`. An empty batch always
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - [`GrantError::Permission`] naming the actor, the kind, every
    ///   requested id and the level held on each, in request order
    /// - any error reported by the store, unchanged
    pub async fn require_level(
        &self,
        kind: ResourceKind,
        actor: Option<&Actor>,
        resource_ids: &[String],
        owner_ids: &HashMap<String, String>,
        required: PermissionLevel,
    ) -> Result<(), GrantError> {
        if resource_ids.is_empty() {
            return Ok(());
        }

        let permissions = self
            .effective_permissions(kind, actor, resource_ids, owner_ids)
            .await?;
        let have = levels_in_order(resource_ids, &permissions);
        let lowest = have.iter().copied().min().unwrap_or_default();

        if lowest.satisfies(required) {
            return Ok(());
        }

        debug!(
            "Denied {:?} {} on {} {:?} (lowest {})",
            actor.map(|a| a.id.as_str()),
            required,
            kind,
            resource_ids,
            lowest
        );
        Err(PermissionDenied {
            actor: actor.cloned(),
            kind,
            resource_ids: resource_ids.to_vec(),
            have,
            need: required,
        }
        .into())
    }

    /// Require `read` on every bundle; owners are looked up in the store
    pub async fn require_read_on_bundles(
        &self,
        actor: Option<&Actor>,
        bundle_uuids: &[String],
    ) -> Result<(), GrantError> {
        self.require_on_bundles(actor, bundle_uuids, PermissionLevel::Read)
            .await
    }

    /// Require `all` on every bundle; owners are looked up in the store
    pub async fn require_all_on_bundles(
        &self,
        actor: Option<&Actor>,
        bundle_uuids: &[String],
    ) -> Result<(), GrantError> {
        self.require_on_bundles(actor, bundle_uuids, PermissionLevel::All)
            .await
    }

    /// Require `read` on a worksheet
    pub async fn require_read_on_worksheet(
        &self,
        actor: Option<&Actor>,
        worksheet: &Worksheet,
    ) -> Result<(), GrantError> {
        self.require_on_worksheet(actor, worksheet, PermissionLevel::Read)
            .await
    }

    /// Require `all` on a worksheet
    pub async fn require_all_on_worksheet(
        &self,
        actor: Option<&Actor>,
        worksheet: &Worksheet,
    ) -> Result<(), GrantError> {
        self.require_on_worksheet(actor, worksheet, PermissionLevel::All)
            .await
    }

    /// Whether the actor may run `bundle` (requires `all`)
    ///
    /// Only a permission denial turns into `Ok(false)`; store failures and
    /// integrity errors are returned as errors.
    pub async fn can_run(
        &self,
        actor: Option<&Actor>,
        bundle: &Bundle,
    ) -> Result<bool, GrantError> {
        match self
            .require_all_on_bundles(actor, std::slice::from_ref(&bundle.uuid))
            .await
        {
            Ok(()) => Ok(true),
            Err(GrantError::Permission(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    async fn require_on_bundles(
        &self,
        actor: Option<&Actor>,
        bundle_uuids: &[String],
        required: PermissionLevel,
    ) -> Result<(), GrantError> {
        if bundle_uuids.is_empty() {
            return Ok(());
        }
        let owner_ids = self
            .store
            .owner_ids(ResourceKind::Bundle, bundle_uuids)
            .await?;
        self.require_level(ResourceKind::Bundle, actor, bundle_uuids, &owner_ids, required)
            .await
    }

    async fn require_on_worksheet(
        &self,
        actor: Option<&Actor>,
        worksheet: &Worksheet,
        required: PermissionLevel,
    ) -> Result<(), GrantError> {
        let owner_ids = HashMap::from([(worksheet.uuid.clone(), worksheet.owner_id.clone())]);
        self.require_level(
            ResourceKind::Worksheet,
            actor,
            std::slice::from_ref(&worksheet.uuid),
            &owner_ids,
            required,
        )
        .await
    }
}

/// Builder for [`PermissionGate`].
///
/// Without an explicit store the gate runs over an empty [`MemoryStore`]
/// configured with the builder's [`StoreOptions`].
///
/// # Examples
///
/// ```rust
/// use grant_gate::prelude::*;
///
/// let gate = PermissionGate::builder()
///     .options(StoreOptions::builder().public_group_id("0xpublic").build())
///     .build();
/// ```
#[derive(Default)]
pub struct PermissionGateBuilder {
    store: Option<Arc<dyn PermissionStore>>,
    options: StoreOptions,
}

impl PermissionGateBuilder {
    /// Use `store` as the data-access layer
    pub fn store(mut self, store: impl PermissionStore + 'static) -> Self {
        let store: Arc<dyn PermissionStore> = Arc::new(store);
        self.store = Some(store);
        self
    }

    /// Use an already shared store
    pub fn shared_store(mut self, store: Arc<dyn PermissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Options for the default in-memory store
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the gate
    pub fn build(self) -> PermissionGate {
        let store = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new(self.options)),
        };
        PermissionGate::new(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupFilter;
    use async_trait::async_trait;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Store whose permission query always reports an integrity failure
    struct BrokenStore;

    #[async_trait]
    impl PermissionStore for BrokenStore {
        async fn search_groups(
            &self,
            _filter: &GroupFilter,
            _scope: &GroupScope,
        ) -> Result<Vec<Group>, GrantError> {
            Err(GrantError::Store("connection reset".to_string()))
        }

        async fn user_permissions(
            &self,
            _kind: ResourceKind,
            _user_id: Option<&str>,
            _resource_ids: &[String],
            _owner_ids: &HashMap<String, String>,
        ) -> Result<HashMap<String, PermissionLevel>, GrantError> {
            ResourceKind::from_table("cl_bundle_tag").map(|_| HashMap::new())
        }

        async fn owner_ids(
            &self,
            _kind: ResourceKind,
            _resource_ids: &[String],
        ) -> Result<HashMap<String, String>, GrantError> {
            Ok(HashMap::new())
        }
    }

    async fn gate_with_reader() -> (PermissionGate, Actor) {
        let store = MemoryStore::default();
        let group = Group::user_defined("readers", "0xz");
        store.add_group(group.clone()).await.unwrap();
        store.add_member(&group.uuid, "0xa").await.unwrap();
        store.set_owner(ResourceKind::Bundle, "0xmine", "0xa").await;
        store.set_owner(ResourceKind::Bundle, "0xtheirs", "0xz").await;
        store
            .grant(&group.uuid, ResourceKind::Bundle, "0xtheirs", PermissionLevel::Read)
            .await
            .unwrap();
        let gate = PermissionGate::builder().store(store).build();
        (gate, Actor::new("0xa", "alice"))
    }

    #[tokio::test]
    async fn test_required_none_always_passes() {
        let gate = PermissionGate::builder().build();
        gate.require_level(
            ResourceKind::Bundle,
            None,
            &ids(&["0xunknown"]),
            &HashMap::new(),
            PermissionLevel::None,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_empty_batch_passes_for_anyone() {
        let gate = PermissionGate::builder().shared_store(Arc::new(BrokenStore)).build();
        gate.require_level(
            ResourceKind::Worksheet,
            None,
            &[],
            &HashMap::new(),
            PermissionLevel::All,
        )
        .await
        .unwrap();
        gate.require_all_on_bundles(None, &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let (gate, alice) = gate_with_reader().await;
        let batch = ids(&["0xmine", "0xtheirs"]);

        gate.require_read_on_bundles(Some(&alice), &batch).await.unwrap();

        let err = gate
            .require_all_on_bundles(Some(&alice), &batch)
            .await
            .unwrap_err();
        match err {
            GrantError::Permission(denied) => {
                assert_eq!(denied.have, vec![PermissionLevel::All, PermissionLevel::Read]);
                assert_eq!(denied.need, PermissionLevel::All);
                assert_eq!(denied.resource_ids, batch);
                assert_eq!(
                    denied.insufficient().collect::<Vec<_>>(),
                    vec![("0xtheirs", PermissionLevel::Read)]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_denial_message_names_everything() {
        let (gate, alice) = gate_with_reader().await;
        let err = gate
            .require_all_on_bundles(Some(&alice), &ids(&["0xmine", "0xtheirs"]))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "User alice(0xa) does not have sufficient permissions on bundle 0xmine 0xtheirs (have all read, need all)."
        );
    }

    #[tokio::test]
    async fn test_worksheet_wrappers_use_worksheet_owner() {
        let gate = PermissionGate::builder().build();
        let alice = Actor::new("0xa", "alice");
        let bob = Actor::new("0xb", "bob");
        let worksheet = Worksheet::new("0xw", "0xa");

        gate.require_all_on_worksheet(Some(&alice), &worksheet)
            .await
            .unwrap();
        let err = gate
            .require_read_on_worksheet(Some(&bob), &worksheet)
            .await
            .unwrap_err();
        match err {
            GrantError::Permission(denied) => {
                assert_eq!(denied.kind, ResourceKind::Worksheet);
                assert_eq!(denied.have, vec![PermissionLevel::None]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_anonymous_denial_uses_marker() {
        let gate = PermissionGate::builder().build();
        let err = gate
            .require_read_on_worksheet(None, &Worksheet::new("0xw", "0xa"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("User <anonymous> does not"));
    }

    #[tokio::test]
    async fn test_can_run() {
        let (gate, alice) = gate_with_reader().await;
        assert!(gate.can_run(Some(&alice), &Bundle::new("0xmine")).await.unwrap());
        assert!(!gate.can_run(Some(&alice), &Bundle::new("0xtheirs")).await.unwrap());
        assert!(!gate.can_run(None, &Bundle::new("0xmine")).await.unwrap());
    }

    #[tokio::test]
    async fn test_can_run_propagates_integrity_error() {
        let gate = PermissionGate::builder().shared_store(Arc::new(BrokenStore)).build();
        let err = gate
            .can_run(Some(&Actor::new("0xa", "alice")), &Bundle::new("0xb"))
            .await
            .unwrap_err();
        assert!(matches!(err, GrantError::Integrity(_)));
    }

    #[tokio::test]
    async fn test_resolver_errors_pass_through_gate() {
        let gate = PermissionGate::builder().shared_store(Arc::new(BrokenStore)).build();
        let err = gate
            .resolve_group("students", &GroupScope::Global)
            .await
            .unwrap_err();
        assert!(matches!(err, GrantError::Store(_)));
    }
}
