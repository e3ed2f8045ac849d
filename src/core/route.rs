//! # Routes
//!
//! A route is one navigable screen, identified by an opaque key.
//! Anything else a framework wants to carry along (ids, titles, tab names)
//! rides in `params` and is flattened on the wire:
//!
//! ```text
//! {"key": "profile", "user_id": 42}
//!   → Route { key: "profile", params: {"user_id": 42} }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything that can live in a navigation stack.
///
/// State operations only ever look at the key, so frameworks with their own
/// route types can implement this instead of converting to [`Route`].
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub key: String,
    #[serde(flatten, default)]
    pub params: Map<String, Value>,
}

impl Route {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: Map::new(),
        }
    }

    /// Builder-style param setter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Creates a route with a fresh key like `screen-1a2b3c4d`.
    pub fn generate(prefix: &str) -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        Self::new(format!("{}-{}", prefix, &id[..8]))
    }
}

impl Keyed for Route {
    fn key(&self) -> &str {
        &self.key
    }
}
