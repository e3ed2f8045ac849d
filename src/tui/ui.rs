use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::navigator::Navigator;
use crate::core::route::Keyed;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HelpBar, RouteList, TitleBar};

pub fn draw_ui(frame: &mut Frame, navigator: &Navigator, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let state = navigator.current();

    let mut title_bar = TitleBar::new(
        state.focused().key().to_string(),
        state.len(),
        navigator.history_len(),
        navigator.status_message.clone(),
        navigator.last_error.is_some(),
    );
    title_bar.render(frame, title_area);

    RouteList::new(&mut tui.route_list, state.routes(), state.index()).render(frame, main_area);

    HelpBar.render(frame, help_area);
}
