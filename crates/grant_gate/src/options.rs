//! Configuration options and builder for the in-memory permission store
//!
//! [`StoreOptions`] names the two identities that receive access without an
//! explicit grant: the root user and the public group.
//!
//! # Example
//!
//! ```
//! use grant_gate::options::StoreOptions;
//!
//! let options = StoreOptions::builder()
//!     .root_user_id("0x00000000000000000000000000000000")
//!     .public_group_id("0xffffffffffffffffffffffffffffffff")
//!     .build();
//!
//! assert!(options.is_root(Some("0x00000000000000000000000000000000")));
//! assert!(!options.is_root(None));
//! ```
//!
//! # Loading from JSON
//!
//! ```
//! use grant_gate::options::StoreOptions;
//!
//! let options = StoreOptions::from_json(r#"{ "public_group_id": "0xpublic" }"#).unwrap();
//! assert_eq!(options.public_group_id.as_deref(), Some("0xpublic"));
//! assert!(options.root_user_id.is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GrantError;

/// Options controlling implicit access in [`MemoryStore`](crate::store::MemoryStore)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// User that has `all` on every resource
    pub root_user_id: Option<String>,
    /// Group every actor, including the anonymous one, implicitly belongs to
    pub public_group_id: Option<String>,
}

impl StoreOptions {
    /// Create a new options builder
    pub fn builder() -> StoreOptionsBuilder {
        StoreOptionsBuilder::default()
    }

    /// Parse options from a JSON document
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`GrantError::Config`] if the document is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, GrantError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether `user_id` is the configured root user
    pub fn is_root(&self, user_id: Option<&str>) -> bool {
        match (user_id, self.root_user_id.as_deref()) {
            (Some(user), Some(root)) => user == root,
            _ => false,
        }
    }
}

/// Builder for [`StoreOptions`]
#[derive(Debug, Default)]
pub struct StoreOptionsBuilder {
    inner: StoreOptions,
}

impl StoreOptionsBuilder {
    /// Set the root user identifier
    pub fn root_user_id(mut self, id: impl Into<String>) -> Self {
        self.inner.root_user_id = Some(id.into());
        self
    }

    /// Set the public group identifier
    pub fn public_group_id(mut self, id: impl Into<String>) -> Self {
        self.inner.public_group_id = Some(id.into());
        self
    }

    /// Build the options
    pub fn build(self) -> StoreOptions {
        self.inner
    }
}
