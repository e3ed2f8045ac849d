//! # Navigator
//!
//! The store that sits on top of `update()`: it owns the current state,
//! dispatches actions, and keeps a bounded history of previous states for
//! undo.
//!
//! ```text
//! Navigator
//! ├── current: NavigationState     // what the UI renders
//! ├── history: VecDeque<State>     // previous states, oldest first
//! ├── history_limit: usize         // max undo depth
//! ├── status_message: String       // last transition, for display
//! └── last_error: Option<NavError> // last refused transition
//! ```
//!
//! Because every transition produces a fresh state, undo is just keeping
//! the old values around.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::core::action::{Action, update};
use crate::core::route::{Keyed, Route};
use crate::core::state::NavigationState;
use crate::core::state_utils::NavError;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

pub struct Navigator<R = Route> {
    current: NavigationState<R>,
    history: VecDeque<NavigationState<R>>,
    history_limit: usize,
    pub status_message: String,
    pub last_error: Option<NavError>,
}

impl<R: Keyed + Clone> Navigator<R> {
    pub fn new(initial: NavigationState<R>, history_limit: usize) -> Self {
        Self {
            current: initial,
            history: VecDeque::new(),
            history_limit,
            status_message: String::new(),
            last_error: None,
        }
    }

    pub fn current(&self) -> &NavigationState<R> {
        &self.current
    }

    /// Number of states `undo()` can step back through.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applies an action. On failure the current state is left untouched and
    /// the error is kept in `last_error`.
    pub fn dispatch(&mut self, action: Action<R>) -> Result<&NavigationState<R>, NavError> {
        let name = action.name();
        match update(&self.current, action) {
            Ok(next) => {
                debug!(
                    "{}: index {} -> {}, depth {} -> {}, focused '{}'",
                    name,
                    self.current.index(),
                    next.index(),
                    self.current.len(),
                    next.len(),
                    next.focused().key()
                );
                let duplicates = next.duplicate_keys();
                if !duplicates.is_empty() {
                    warn!("{} left duplicate route keys: {:?}", name, duplicates);
                }

                let previous = std::mem::replace(&mut self.current, next);
                self.remember(previous);
                self.status_message = format!("{} → {}", name, self.current.focused().key());
                self.last_error = None;
                Ok(&self.current)
            }
            Err(e) => {
                warn!("{} rejected: {}", name, e);
                self.status_message = format!("{} failed: {}", name, e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Restores the previous state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                debug!(
                    "undo: restoring depth {} at index {}",
                    previous.len(),
                    previous.index()
                );
                self.current = previous;
                self.status_message = format!("undo → {}", self.current.focused().key());
                self.last_error = None;
                true
            }
            None => {
                self.status_message = String::from("nothing to undo");
                false
            }
        }
    }

    fn remember(&mut self, state: NavigationState<R>) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(state);
    }
}
