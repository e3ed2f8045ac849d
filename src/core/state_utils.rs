//! # State Utilities
//!
//! Atomic operations over a [`NavigationState`]. Every function borrows the
//! old state and hands back a new one, so previous states stay valid for undo,
//! diffing, or whoever else is holding them.
//!
//! ```text
//! [A, B]  ──push(C)──▶  [A, B, C*]
//! [A, B*] ──pop()───▶   [A*]
//! [A, B*] ──back()──▶   [A*, B]
//! [A, B*] ──replace_and_prune("A", A2)──▶ [A2*]
//! ```
//!
//! Lookups return the first route with a matching key. Anything that cannot
//! produce a valid state (unknown key, index past the end, popping the last
//! route) is reported as a [`NavError`] rather than a broken state.

use std::fmt;

use crate::core::route::Keyed;
use crate::core::state::NavigationState;

/// Why a transition was refused. The input state is always left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// No route in the stack has this key.
    KeyNotFound(String),
    /// Index is not a position in the stack.
    IndexOutOfRange { index: usize, len: usize },
    /// `back` while the first route is focused.
    AtFirstRoute,
    /// `forward` while the last route is focused.
    AtLastRoute,
    /// `pop` on a single-route stack.
    CannotPopLastRoute,
    /// A state needs at least one route.
    EmptyRoutes,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::KeyNotFound(key) => write!(f, "no route with key '{key}'"),
            NavError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} routes")
            }
            NavError::AtFirstRoute => write!(f, "already at the first route"),
            NavError::AtLastRoute => write!(f, "already at the last route"),
            NavError::CannotPopLastRoute => write!(f, "cannot pop the only route"),
            NavError::EmptyRoutes => write!(f, "routes must not be empty"),
        }
    }
}

impl std::error::Error for NavError {}

// ============================================================================
// Queries
// ============================================================================

/// Gets a route by key.
pub fn get<'a, R: Keyed>(state: &'a NavigationState<R>, key: &str) -> Option<&'a R> {
    state.routes().iter().find(|route| route.key() == key)
}

/// Position of the first route with `key`.
pub fn index_of<R: Keyed>(state: &NavigationState<R>, key: &str) -> Option<usize> {
    state.routes().iter().position(|route| route.key() == key)
}

pub fn has<R: Keyed>(state: &NavigationState<R>, key: &str) -> bool {
    index_of(state, key).is_some()
}

fn require_index_of<R: Keyed>(state: &NavigationState<R>, key: &str) -> Result<usize, NavError> {
    index_of(state, key).ok_or_else(|| NavError::KeyNotFound(key.to_string()))
}

fn check_index<R>(state: &NavigationState<R>, index: usize) -> Result<(), NavError> {
    if index < state.len() {
        Ok(())
    } else {
        Err(NavError::IndexOutOfRange {
            index,
            len: state.len(),
        })
    }
}

// ============================================================================
// Stack
// ============================================================================

/// Pushes a route and focuses it. Key uniqueness is the caller's business.
pub fn push<R: Clone>(state: &NavigationState<R>, route: R) -> NavigationState<R> {
    let mut routes = Vec::with_capacity(state.len() + 1);
    routes.extend_from_slice(state.routes());
    routes.push(route);
    let index = routes.len() - 1;
    NavigationState::from_parts_unchecked(routes, index)
}

/// Pops the last route and focuses the new last one.
pub fn pop<R: Clone>(state: &NavigationState<R>) -> Result<NavigationState<R>, NavError> {
    if state.len() <= 1 {
        return Err(NavError::CannotPopLastRoute);
    }
    let routes = state.routes()[..state.len() - 1].to_vec();
    let index = routes.len() - 1;
    Ok(NavigationState::from_parts_unchecked(routes, index))
}

// ============================================================================
// Focus
// ============================================================================

/// Sets the focused route by index.
pub fn jump_to_index<R: Clone>(
    state: &NavigationState<R>,
    index: usize,
) -> Result<NavigationState<R>, NavError> {
    check_index(state, index)?;
    Ok(NavigationState::from_parts_unchecked(
        state.routes().to_vec(),
        index,
    ))
}

/// Sets the focused route by key.
pub fn jump_to<R: Keyed + Clone>(
    state: &NavigationState<R>,
    key: &str,
) -> Result<NavigationState<R>, NavError> {
    let index = require_index_of(state, key)?;
    jump_to_index(state, index)
}

/// Focuses the previous route.
pub fn back<R: Clone>(state: &NavigationState<R>) -> Result<NavigationState<R>, NavError> {
    let index = state.index().checked_sub(1).ok_or(NavError::AtFirstRoute)?;
    jump_to_index(state, index)
}

/// Focuses the next route.
pub fn forward<R: Clone>(state: &NavigationState<R>) -> Result<NavigationState<R>, NavError> {
    let index = state.index() + 1;
    if index >= state.len() {
        return Err(NavError::AtLastRoute);
    }
    jump_to_index(state, index)
}

// ============================================================================
// Replace
// ============================================================================

/// Replaces the route at `index` and focuses it.
pub fn replace_at_index<R: Clone>(
    state: &NavigationState<R>,
    index: usize,
    route: R,
) -> Result<NavigationState<R>, NavError> {
    check_index(state, index)?;
    let mut routes = state.routes().to_vec();
    routes[index] = route;
    Ok(NavigationState::from_parts_unchecked(routes, index))
}

/// Replaces the route with `key`. Focus moves to the replaced position unless
/// `preserve_index` is set.
pub fn replace_at<R: Keyed + Clone>(
    state: &NavigationState<R>,
    key: &str,
    route: R,
    preserve_index: bool,
) -> Result<NavigationState<R>, NavError> {
    let position = require_index_of(state, key)?;
    let replaced = replace_at_index(state, position, route)?;
    if preserve_index {
        let (routes, _) = replaced.into_parts();
        Ok(NavigationState::from_parts_unchecked(routes, state.index()))
    } else {
        Ok(replaced)
    }
}

/// Replaces the route with `key` and drops everything above it.
pub fn replace_and_prune<R: Keyed + Clone>(
    state: &NavigationState<R>,
    key: &str,
    route: R,
) -> Result<NavigationState<R>, NavError> {
    let position = require_index_of(state, key)?;
    let mut routes = state.routes()[..position].to_vec();
    routes.push(route);
    Ok(NavigationState::from_parts_unchecked(routes, position))
}

// ============================================================================
// Reset
// ============================================================================

/// Replaces the whole stack. Without an explicit `index` the last route is
/// focused. The previous state is taken only to keep the call shape uniform.
pub fn reset<R>(
    _state: &NavigationState<R>,
    routes: Vec<R>,
    index: Option<usize>,
) -> Result<NavigationState<R>, NavError> {
    let index = match index {
        Some(index) => index,
        None => routes.len().checked_sub(1).ok_or(NavError::EmptyRoutes)?,
    };
    NavigationState::new(routes, index)
}
