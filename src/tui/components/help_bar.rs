//! # HelpBar Component
//!
//! Bottom line listing the key bindings. Narrow terminals get the first
//! few hints that fit rather than a wrapped mess.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub const KEY_HINTS: &[(&str, &str)] = &[
    ("p", "push"),
    ("⌫", "pop"),
    ("←/→", "back/fwd"),
    ("↑/↓", "select"),
    ("⏎", "jump"),
    ("i", "jump idx"),
    ("r/R", "replace"),
    ("x", "replace idx"),
    ("P", "prune"),
    ("c", "reset"),
    ("u", "undo"),
    ("q", "quit"),
];

pub struct HelpBar;

/// Display columns taken by one rendered hint: ` {key} {label} `.
fn hint_width(key: &str, label: &str) -> usize {
    key.width() + label.width() + 3
}

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Yellow);
        let text_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        let mut used = 0usize;
        for (key, label) in KEY_HINTS {
            let width = hint_width(key, label);
            if used + width > area.width as usize {
                break;
            }
            spans.push(Span::styled(format!(" {key}"), key_style));
            spans.push(Span::styled(format!(" {label} "), text_style));
            used += width;
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| HelpBar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_help_bar_lists_all_keys_when_wide() {
        let text = render_text(200);
        assert!(text.contains("push"));
        assert!(text.contains("undo"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn test_hint_width_counts_display_columns() {
        assert_eq!(hint_width("p", "push"), 8);
        assert_eq!(hint_width("←/→", "back/fwd"), 14);
        // Wide glyphs take two columns each
        assert_eq!(hint_width("全", "x"), 6);
    }

    #[test]
    fn test_help_bar_fills_exact_width() {
        // " p push " + " ⌫ pop " is 8 + 7 columns
        let text = render_text(15);
        assert!(text.contains("push"));
        assert!(text.contains("pop"));
        assert!(!text.contains("back"));
    }

    #[test]
    fn test_help_bar_drops_hints_that_do_not_fit() {
        let text = render_text(20);
        assert!(text.contains("push"));
        assert!(!text.contains("quit"));
    }
}
