//! # Navigation State
//!
//! The one data shape everything else transforms:
//!
//! ```text
//! NavigationState
//! ├── routes: Vec<R>   // ordered stack, bottom first, never empty
//! └── index: usize     // focused route, always < routes.len()
//! ```
//!
//! Fields are private so the invariants above hold for every value that
//! exists, including ones deserialized from JSON. New states come from
//! `NavigationState::new` or from the operations in `state_utils`.

use serde::{Deserialize, Serialize};

use crate::core::route::{Keyed, Route};
use crate::core::state_utils::NavError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawState<R>",
    bound(deserialize = "R: Deserialize<'de>")
)]
pub struct NavigationState<R = Route> {
    routes: Vec<R>,
    index: usize,
}

/// Unvalidated wire form; checked by `TryFrom` on the way in.
#[derive(Deserialize)]
struct RawState<R> {
    routes: Vec<R>,
    index: usize,
}

impl<R> TryFrom<RawState<R>> for NavigationState<R> {
    type Error = NavError;

    fn try_from(raw: RawState<R>) -> Result<Self, Self::Error> {
        NavigationState::new(raw.routes, raw.index)
    }
}

impl<R> NavigationState<R> {
    pub fn new(routes: Vec<R>, index: usize) -> Result<Self, NavError> {
        if routes.is_empty() {
            return Err(NavError::EmptyRoutes);
        }
        if index >= routes.len() {
            return Err(NavError::IndexOutOfRange {
                index,
                len: routes.len(),
            });
        }
        Ok(Self { routes, index })
    }

    /// A single-route stack focused on `root`.
    pub fn with_root(root: R) -> Self {
        Self {
            routes: vec![root],
            index: 0,
        }
    }

    /// Internal constructor for callers that already checked the invariants.
    pub(crate) fn from_parts_unchecked(routes: Vec<R>, index: usize) -> Self {
        debug_assert!(index < routes.len());
        Self { routes, index }
    }

    pub fn routes(&self) -> &[R] {
        &self.routes
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The focused route, `routes[index]`.
    pub fn focused(&self) -> &R {
        &self.routes[self.index]
    }

    pub fn into_parts(self) -> (Vec<R>, usize) {
        (self.routes, self.index)
    }
}

impl<R: Keyed> NavigationState<R> {
    /// Keys in stack order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(Keyed::key)
    }

    /// Keys that appear more than once, in order of their second appearance.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.keys().filter(|key| !seen.insert(*key)).collect()
    }
}
