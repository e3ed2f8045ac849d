//! navstack library exports
//!
//! Immutable navigation-state operations for stack/tab style UIs, plus a
//! store, a scenario replayer and a terminal playground built on them.

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::state_utils;
pub use crate::core::{Action, Keyed, NavError, NavigationState, Navigator, Route};
