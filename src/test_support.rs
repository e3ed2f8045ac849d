//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::route::Route;
use crate::core::state::NavigationState;

/// A param-less route.
pub fn route(key: &str) -> Route {
    Route::new(key)
}

/// Builds a state from keys. Panics on invalid input, which is what tests want.
pub fn state(keys: &[&str], index: usize) -> NavigationState {
    NavigationState::new(keys.iter().map(|k| route(k)).collect(), index)
        .expect("test state must be valid")
}

/// Keys of a state in stack order.
pub fn keys(state: &NavigationState) -> Vec<&str> {
    state.keys().collect()
}
