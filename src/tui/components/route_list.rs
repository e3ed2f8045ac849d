//! # Route List Component
//!
//! The navigation stack, bottom route first. The focused route (the one the
//! state's `index` points at) is marked with `▶`; the selection cursor is a
//! separate, TUI-only pointer that picks the target for jump/replace keys.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RouteListState` lives in `TuiState`
//! - `RouteList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::route::Route;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent selection state for the route list.
pub struct RouteListState {
    pub selected: usize,
    pub len: usize,
    pub list_state: ListState,
}

impl RouteListState {
    pub fn new(selected: usize, len: usize) -> Self {
        let mut state = Self {
            selected: 0,
            len,
            list_state: ListState::default(),
        };
        state.select(selected);
        state
    }

    /// Moves the cursor, clamped to the current stack.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.len.saturating_sub(1));
        self.list_state.select(Some(self.selected));
    }

    /// Re-clamps the cursor after the stack changed size.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        self.select(self.selected);
    }
}

/// Events emitted by the route list.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteListEvent {
    /// Enter on the selected route.
    Activate(usize),
}

impl EventHandler for RouteListState {
    type Event = RouteListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RouteListEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(RouteListEvent::Activate(self.selected)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the route list.
pub struct RouteList<'a> {
    state: &'a mut RouteListState,
    routes: &'a [Route],
    focused: usize,
}

impl<'a> RouteList<'a> {
    pub fn new(state: &'a mut RouteListState, routes: &'a [Route], focused: usize) -> Self {
        Self {
            state,
            routes,
            focused,
        }
    }
}

impl Component for RouteList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Stack ")
            .padding(Padding::horizontal(1));

        // borders + padding
        let inner_width = area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let is_focused = i == self.focused;
                let marker = if is_focused { "▶ " } else { "  " };
                let label = format!("{marker}[{i}] {}", route.key);

                let params = if route.params.is_empty() {
                    String::new()
                } else {
                    serde_json::to_string(&route.params).unwrap_or_default()
                };

                let label_width = label.width();
                let params = truncate_to_width(
                    &params,
                    inner_width.saturating_sub(label_width + 2),
                );

                let mut style = if is_focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if i == self.state.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                let mut spans = vec![Span::styled(label, style)];
                if !params.is_empty() {
                    spans.push(Span::styled("  ", style));
                    spans.push(Span::styled(params, style.add_modifier(Modifier::DIM)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` display columns, adding "…" if needed.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("home"),
            Route::new("inbox").with_param("unread", 3),
            Route::new("settings"),
        ]
    }

    fn render_lines(state: &mut RouteListState, routes: &[Route], focused: usize) -> Vec<String> {
        let backend = TestBackend::new(60, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                RouteList::new(state, routes, focused).render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<String> = buffer
            .content()
            .iter()
            .map(|c| c.symbol().to_string())
            .collect();
        symbols.chunks(width).map(|row| row.concat()).collect()
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut state = RouteListState::new(0, 3);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 2);
        assert_eq!(state.list_state.selected(), Some(2));
    }

    #[test]
    fn test_submit_activates_selection() {
        let mut state = RouteListState::new(1, 3);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(RouteListEvent::Activate(1))
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_sync_len_clamps_selection() {
        let mut state = RouteListState::new(2, 3);
        state.sync_len(1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_render_marks_focused_route() {
        let mut state = RouteListState::new(0, 3);
        let lines = render_lines(&mut state, &routes(), 1);
        assert!(lines.iter().any(|l| l.contains("▶ [1] inbox")));
        assert!(lines.iter().any(|l| l.contains("  [0] home")));
        assert!(lines.iter().any(|l| l.contains(r#"{"unread":3}"#)));
        assert!(lines[0].contains("Stack"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("abcdef", 10), "abcdef");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abcdef", 0), "");
    }
}
