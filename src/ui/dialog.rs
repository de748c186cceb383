use crate::app::state::AppState;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(ref message) = state.dialog.message else {
        return;
    };

    let popup = centered(area, 60, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Alert ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .style(Theme::dialog());

    let text = vec![
        Line::from(message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "[ OK ]  Enter / Esc",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}
