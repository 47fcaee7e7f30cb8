//! Resolution of human-entered group specifiers.
//!
//! Users refer to groups in three ways: by pasting a full identifier, by
//! pasting the first few characters of one, or by typing the group's name.
//! [`resolve_group`] accepts all three and returns exactly one group or an
//! error explaining why it could not.
//!
//! # Example
//!
//! ```rust
//! use grant_gate::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), GrantError> {
//! let store = MemoryStore::default();
//! let group = Group::user_defined("students", "0xalice");
//! store.add_group(group.clone()).await?;
//!
//! let by_name = resolve_group(&store, "students", &GroupScope::Global).await?;
//! let by_prefix = resolve_group(&store, &group.uuid[..8], &GroupScope::Global).await?;
//! assert_eq!(by_name, by_prefix);
//! # Ok(())
//! # }
//! ```

mod resolver;
mod specifier;

pub use resolver::{resolve_group, unique_group};
pub use specifier::{GroupFilter, check_name, is_uuid, is_uuid_prefix};
