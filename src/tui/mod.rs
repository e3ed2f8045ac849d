//! # TUI Playground
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the stack,
//! and translates keyboard events into core `Action` values that a
//! `Navigator` dispatches.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms in `poll` and only
//! redraws after an event. All pending events are drained before the next
//! draw so key repeat doesn't queue up frames.
//!
//! ## Keys → Actions
//!
//! ```text
//! p        push <prefix>-<id>          ⌫   pop
//! ←  →     back / forward              ⏎   jump_to(selected key)
//! i        jump_to_index(selected)     c   reset to the configured stack
//! r  R     replace_at(selected), preserving / moving focus
//! x        replace_at_index(selected)  P   replace_and_prune(selected)
//! u        undo                        q   quit
//! ```

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io;
use std::time::Duration;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::navigator::Navigator;
use crate::core::route::Route;
use crate::core::state::NavigationState;
use crate::tui::component::EventHandler;
use crate::tui::components::{RouteListEvent, RouteListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core navigation logic)
pub struct TuiState {
    pub route_list: RouteListState,
    /// Prefix for generated route keys.
    pub key_prefix: String,
    /// Stack that `c` resets to.
    pub initial: NavigationState,
}

impl TuiState {
    pub fn new(initial: &NavigationState, key_prefix: String) -> Self {
        Self {
            route_list: RouteListState::new(initial.index(), initial.len()),
            key_prefix,
            initial: initial.clone(),
        }
    }

    /// A fresh route standing in for `old_key`.
    fn replacement_for(&self, old_key: &str) -> Route {
        Route::generate(&self.key_prefix).with_param("replaces", old_key)
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq)]
enum Intent {
    Dispatch(Action),
    Undo,
    Quit,
}

/// Restores the terminal on every exit path, including panics.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut navigator = Navigator::new(config.initial_state.clone(), config.history_limit);
    let mut tui = TuiState::new(&config.initial_state, config.key_prefix);

    let mut terminal = ratatui::init();
    let _terminal_guard = TerminalGuard;
    info!("Terminal initialized");

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &navigator, &mut tui))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(Duration::from_millis(500))? else {
            continue;
        };
        needs_redraw = true;

        // Process first event + drain all pending events before next draw
        let mut pending = Some(first_event);
        while let Some(event) = pending {
            if handle_event(&event, &mut navigator, &mut tui) {
                info!("Quit requested");
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}

/// Applies one event. Returns true when the user asked to quit.
fn handle_event(event: &TuiEvent, navigator: &mut Navigator, tui: &mut TuiState) -> bool {
    match intent_for(event, navigator.current(), tui) {
        Some(Intent::Quit) => return true,
        Some(Intent::Undo) => {
            if navigator.undo() {
                tui.route_list.sync_len(navigator.current().len());
                tui.route_list.select(navigator.current().index());
            }
        }
        Some(Intent::Dispatch(action)) => {
            debug!("Dispatching {}", action.name());
            // Failures are recorded on the navigator and shown in the title bar
            if navigator.dispatch(action).is_ok() {
                tui.route_list.sync_len(navigator.current().len());
                tui.route_list.select(navigator.current().index());
            }
        }
        None => {}
    }
    false
}

/// Maps a key to an intent, resolving "selected" against the current stack.
fn intent_for(event: &TuiEvent, state: &NavigationState, tui: &mut TuiState) -> Option<Intent> {
    if let Some(RouteListEvent::Activate(i)) = tui.route_list.handle_event(event) {
        let key = state.routes().get(i)?.key.clone();
        return Some(Intent::Dispatch(Action::JumpTo { key }));
    }

    let selected = tui.route_list.selected;
    let selected_key = state.routes().get(selected).map(|r| r.key.clone());

    let action = match event {
        TuiEvent::Quit => return Some(Intent::Quit),
        TuiEvent::InputChar('u') => return Some(Intent::Undo),
        TuiEvent::Backspace => Action::Pop,
        TuiEvent::CursorLeft => Action::Back,
        TuiEvent::CursorRight => Action::Forward,
        TuiEvent::InputChar('p') => Action::Push {
            route: Route::generate(&tui.key_prefix),
        },
        TuiEvent::InputChar('i') => Action::JumpToIndex { index: selected },
        TuiEvent::InputChar(c @ ('r' | 'R')) => {
            let key = selected_key?;
            Action::ReplaceAt {
                route: tui.replacement_for(&key),
                key,
                preserve_index: *c == 'r',
            }
        }
        TuiEvent::InputChar('x') => Action::ReplaceAtIndex {
            index: selected,
            route: tui.replacement_for(selected_key.as_deref().unwrap_or_default()),
        },
        TuiEvent::InputChar('P') => {
            let key = selected_key?;
            Action::ReplaceAndPrune {
                route: tui.replacement_for(&key),
                key,
            }
        }
        TuiEvent::InputChar('c') => Action::Reset {
            routes: tui.initial.routes().to_vec(),
            index: Some(tui.initial.index()),
        },
        _ => return None,
    };
    Some(Intent::Dispatch(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{keys, state};

    fn setup() -> (Navigator, TuiState) {
        let initial = state(&["home", "inbox", "settings"], 0);
        let tui = TuiState::new(&initial, "screen".into());
        (Navigator::new(initial, 10), tui)
    }

    #[test]
    fn test_push_key_generates_prefixed_route() {
        let (mut nav, mut tui) = setup();
        assert!(!handle_event(&TuiEvent::InputChar('p'), &mut nav, &mut tui));
        assert_eq!(nav.current().len(), 4);
        assert!(nav.current().focused().key.starts_with("screen-"));
        // Selection follows focus
        assert_eq!(tui.route_list.selected, 3);
    }

    #[test]
    fn test_enter_jumps_to_selected() {
        let (mut nav, mut tui) = setup();
        handle_event(&TuiEvent::CursorDown, &mut nav, &mut tui);
        handle_event(&TuiEvent::CursorDown, &mut nav, &mut tui);
        handle_event(&TuiEvent::Submit, &mut nav, &mut tui);
        assert_eq!(nav.current().index(), 2);
        assert_eq!(keys(nav.current()), vec!["home", "inbox", "settings"]);
    }

    #[test]
    fn test_back_at_first_route_reports_error() {
        let (mut nav, mut tui) = setup();
        handle_event(&TuiEvent::CursorLeft, &mut nav, &mut tui);
        assert_eq!(nav.current().index(), 0);
        assert!(nav.last_error.is_some());
    }

    #[test]
    fn test_replace_keeps_or_moves_focus() {
        let (mut nav, mut tui) = setup();
        handle_event(&TuiEvent::CursorDown, &mut nav, &mut tui);

        handle_event(&TuiEvent::InputChar('r'), &mut nav, &mut tui);
        assert_eq!(nav.current().index(), 0);
        let replaced = &nav.current().routes()[1];
        assert_eq!(replaced.params["replaces"], "inbox");

        handle_event(&TuiEvent::CursorDown, &mut nav, &mut tui);
        handle_event(&TuiEvent::InputChar('R'), &mut nav, &mut tui);
        assert_eq!(nav.current().index(), 1);
    }

    #[test]
    fn test_prune_and_reset() {
        let (mut nav, mut tui) = setup();
        handle_event(&TuiEvent::InputChar('P'), &mut nav, &mut tui);
        assert_eq!(nav.current().len(), 1);
        assert_eq!(tui.route_list.len, 1);

        handle_event(&TuiEvent::InputChar('c'), &mut nav, &mut tui);
        assert_eq!(keys(nav.current()), vec!["home", "inbox", "settings"]);
        assert_eq!(nav.current().index(), 0);
    }

    #[test]
    fn test_undo_and_quit() {
        let (mut nav, mut tui) = setup();
        handle_event(&TuiEvent::Backspace, &mut nav, &mut tui);
        assert_eq!(nav.current().len(), 2);
        handle_event(&TuiEvent::InputChar('u'), &mut nav, &mut tui);
        assert_eq!(nav.current().len(), 3);
        assert!(handle_event(&TuiEvent::Quit, &mut nav, &mut tui));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (nav, mut tui) = setup();
        assert_eq!(intent_for(&TuiEvent::InputChar('z'), nav.current(), &mut tui), None);
        assert_eq!(intent_for(&TuiEvent::Resize, nav.current(), &mut tui), None);
    }
}
