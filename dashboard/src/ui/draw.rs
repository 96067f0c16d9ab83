use ratatui::{widgets::Block, Frame};

use crate::state::dashboard::{DashboardState, Focus};

use super::{layout, theme::Theme, widgets};

/// Draws the entire UI.
pub fn draw(f: &mut Frame, state: &DashboardState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (header_area, body_area, hint_area) = layout::vertical(area);
    let (sidebar_area, main_area) = layout::body(body_area);
    let (name_area, slider_area, button_area, model_area) = layout::sidebar(sidebar_area);
    let (results_area, how_area) = layout::main(main_area);

    f.render_widget(widgets::header(), header_area);

    f.render_widget(
        widgets::client_name(state, state.focus == Focus::ClientName),
        name_area,
    );
    f.render_widget(
        widgets::signal(state, state.focus == Focus::Signal),
        slider_area,
    );
    f.render_widget(
        widgets::button(state.focus == Focus::Button),
        button_area,
    );
    f.render_widget(widgets::model(state), model_area);

    f.render_widget(widgets::results(state), results_area);
    f.render_widget(widgets::how_it_works(), how_area);
    f.render_widget(widgets::hint(state.focus), hint_area);
}
