//! # Core Navigation Logic
//!
//! This module contains navstack's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │           CORE              │
//!                    │  (this module)              │
//!                    │                             │
//!                    │  • NavigationState (data)   │
//!                    │  • state_utils (transforms) │
//!                    │  • Action + update()        │
//!                    │  • Navigator (store)        │
//!                    │                             │
//!                    │  No UI. Pure transforms.    │
//!                    └──────────────┬──────────────┘
//!                                   │
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │    TUI     │         │   Replay   │         │ Your own   │
//!     │ playground │         │   (CLI)    │         │ framework  │
//!     │ (ratatui)  │         │            │         │            │
//!     └────────────┘         └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: `Route` and the `Keyed` trait
//! - [`state`]: `NavigationState`, the routes + focused index pair
//! - [`state_utils`]: the immutable operations (push, pop, jump, replace, reset)
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`navigator`]: a store with undo history on top of `update()`
//! - [`scenario`]: scripted replays of action lists
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod config;
pub mod navigator;
pub mod route;
pub mod scenario;
pub mod state;
pub mod state_utils;

// Re-export commonly used types for convenience
pub use action::{Action, update};
pub use navigator::Navigator;
pub use route::{Keyed, Route};
pub use state::NavigationState;
pub use state_utils::NavError;
