//! # TitleBar Component
//!
//! Top status bar: focused route, stack depth, undo depth, and the result of
//! the last transition.
//!
//! Stateless: it receives everything as props and renders a single line.
//! When the last transition was refused, the status is drawn in red so the
//! user sees why nothing moved.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub focused_key: String,
    pub depth: usize,
    pub undo_depth: usize,
    pub status_message: String,
    pub is_error: bool,
}

impl TitleBar {
    pub fn new(
        focused_key: String,
        depth: usize,
        undo_depth: usize,
        status_message: String,
        is_error: bool,
    ) -> Self {
        Self {
            focused_key,
            depth,
            undo_depth,
            status_message,
            is_error,
        }
    }

    fn heading(&self) -> String {
        format!(
            "navstack | focused: {} | depth {} | undo {}",
            self.focused_key, self.depth, self.undo_depth
        )
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if !self.status_message.is_empty() {
            let status_style = if self.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(self.status_message.clone(), status_style));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_shows_focus_and_depth() {
        let mut title_bar = TitleBar::new("inbox".into(), 3, 2, String::new(), false);
        let text = render_text(&mut title_bar);
        assert!(text.contains("focused: inbox"));
        assert!(text.contains("depth 3"));
        assert!(text.contains("undo 2"));
        assert!(!text.contains("failed"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("B".into(), 2, 0, "push → B".into(), false);
        let text = render_text(&mut title_bar);
        assert!(text.contains("push → B"));
    }

    #[test]
    fn test_title_bar_error_is_red() {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut title_bar = TitleBar::new(
            "A".into(),
            1,
            0,
            "pop failed: cannot pop the only route".into(),
            true,
        );
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let start = text.find("pop failed").unwrap();
        // Single-width ASCII up to here, so byte offset == column
        assert_eq!(buffer.content()[start].fg, Color::Red);
    }
}
