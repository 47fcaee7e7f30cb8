//! Permission checks for bundles and worksheets.
//!
//! This module computes what an actor may do with a batch of resources and
//! enforces a minimum level across the whole batch.
//!
//! # Architecture
//!
//! A check flows through two layers:
//!
//! 1. **Aggregation** - [`effective_permissions`] asks the store for the
//!    actor's level on every resource in one query, then fills gaps with
//!    `none` and forces `all` on resources the actor owns
//! 2. **Enforcement** - [`PermissionGate::require_level`] takes the lowest
//!    level in the batch and compares it with the requirement
//!
//! A batch passes only if every resource passes. There is no partial grant.
//!
//! # Examples
//!
//! ## Requiring read access on bundles
//!
//! ```rust
//! use grant_gate::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), GrantError> {
//! let store = MemoryStore::new(StoreOptions::builder().public_group_id("0xpublic").build());
//! store.grant("0xpublic", ResourceKind::Bundle, "0xb1", PermissionLevel::Read).await?;
//!
//! let gate = PermissionGate::builder().store(store).build();
//!
//! // Anyone, including anonymous visitors, can read a public bundle.
//! gate.require_read_on_bundles(None, &["0xb1".to_string()]).await?;
//!
//! // Nobody but its owner can run it.
//! assert!(!gate.can_run(None, &Bundle::new("0xb1")).await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting a denial
//!
//! ```rust
//! use grant_gate::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gate = PermissionGate::builder().build();
//! let worksheet = Worksheet::new("0xw", "0xowner");
//!
//! match gate.require_all_on_worksheet(None, &worksheet).await {
//!     Err(GrantError::Permission(denied)) => {
//!         assert_eq!(denied.have, vec![PermissionLevel::None]);
//!     }
//!     other => panic!("expected a denial, got {:?}", other),
//! }
//! # }
//! ```

mod aggregate;
mod gate;

pub use aggregate::{effective_permissions, levels_in_order};
pub use gate::{PermissionGate, PermissionGateBuilder};
