//! # Actions
//!
//! Every transition a navigator can make becomes an `Action`.
//! User presses ←? That's `Action::Back`. A deep link arrives? That's
//! `Action::ReplaceAndPrune { .. }`.
//!
//! The `update()` function takes the current state and an action, then
//! returns the new state. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Actions are serde-tagged so scenario files can spell them out:
//! `{"type": "replace_at", "key": "B", "route": {"key": "B2"}, "preserve_index": true}`.

use serde::{Deserialize, Serialize};

use crate::core::route::{Keyed, Route};
use crate::core::state::NavigationState;
use crate::core::state_utils::{self, NavError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action<R = Route> {
    Push {
        route: R,
    },
    Pop,
    JumpToIndex {
        index: usize,
    },
    JumpTo {
        key: String,
    },
    Back,
    Forward,
    ReplaceAndPrune {
        key: String,
        route: R,
    },
    ReplaceAt {
        key: String,
        route: R,
        #[serde(default)]
        preserve_index: bool,
    },
    ReplaceAtIndex {
        index: usize,
        route: R,
    },
    Reset {
        routes: Vec<R>,
        #[serde(default)]
        index: Option<usize>,
    },
}

impl<R> Action<R> {
    /// Short name used in logs, reports and the status bar.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Push { .. } => "push",
            Action::Pop => "pop",
            Action::JumpToIndex { .. } => "jump_to_index",
            Action::JumpTo { .. } => "jump_to",
            Action::Back => "back",
            Action::Forward => "forward",
            Action::ReplaceAndPrune { .. } => "replace_and_prune",
            Action::ReplaceAt { .. } => "replace_at",
            Action::ReplaceAtIndex { .. } => "replace_at_index",
            Action::Reset { .. } => "reset",
        }
    }
}

/// Applies an action to a state.
pub fn update<R: Keyed + Clone>(
    state: &NavigationState<R>,
    action: Action<R>,
) -> Result<NavigationState<R>, NavError> {
    match action {
        Action::Push { route } => Ok(state_utils::push(state, route)),
        Action::Pop => state_utils::pop(state),
        Action::JumpToIndex { index } => state_utils::jump_to_index(state, index),
        Action::JumpTo { key } => state_utils::jump_to(state, &key),
        Action::Back => state_utils::back(state),
        Action::Forward => state_utils::forward(state),
        Action::ReplaceAndPrune { key, route } => {
            state_utils::replace_and_prune(state, &key, route)
        }
        Action::ReplaceAt {
            key,
            route,
            preserve_index,
        } => state_utils::replace_at(state, &key, route, preserve_index),
        Action::ReplaceAtIndex { index, route } => {
            state_utils::replace_at_index(state, index, route)
        }
        Action::Reset { routes, index } => state_utils::reset(state, routes, index),
    }
}
