//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: focused route, depth, undo depth, last status
//! - `HelpBar`: key bindings
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `RouteList`: the stack with a selection cursor; `RouteListState`
//!   persists in `TuiState` and emits `RouteListEvent`s
//!
//! Components receive external data as props instead of reaching into the
//! `Navigator`, so each one can be rendered against a `TestBackend` in
//! isolation.
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── title_bar.rs   (top status line)
//! ├── route_list.rs  (stack view + selection)
//! └── help_bar.rs    (key hints)
//! ```

pub mod help_bar;
pub mod route_list;
pub mod title_bar;

pub use help_bar::HelpBar;
pub use route_list::{RouteList, RouteListEvent, RouteListState};
pub use title_bar::TitleBar;
