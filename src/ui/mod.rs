mod dialog;
mod form_panel;
mod layout;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.forms.len());

    let title = format!(
        " Advent of Code {} · Day {} ",
        state.config.server.year, state.config.server.day
    );
    frame.render_widget(Paragraph::new(title).style(Theme::title()), app_layout.title_bar);

    for (view, rect) in state.forms.iter().zip(app_layout.forms.iter()) {
        form_panel::render(frame, *rect, state, view);
    }
    status_bar::render(frame, app_layout.status_bar, state);
    dialog::render(frame, area, state);
}
