use crate::app::state::*;
use crate::form::controller::Phase;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let waiting = state
        .forms
        .iter()
        .filter(|f| *f.controller.phase() == Phase::CountingDown)
        .count();
    if waiting > 0 {
        parts.push(Span::styled(
            format!(" | Waiting: {} ", waiting),
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        ));
    }

    let focus_name = match state.focus.field {
        Field::FilePath => "FILE",
        Field::Answer => "ANSWER",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
