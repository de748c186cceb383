use crate::app::state::*;
use crate::form::controller::{Phase, Resolution, ERROR_TEXT};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, view: &FormView) {
    let form_id = view.controller.id();
    let focused_form = state.focus.form == form_id;

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .title_style(if focused_form { Theme::title() } else { Theme::border() })
        .title_bottom(Line::from(format!(" {} ", view.controller.form().id)).right_aligned())
        .borders(Borders::ALL)
        .border_type(if focused_form {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        })
        .border_style(if focused_form {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // File input
            Constraint::Length(3), // Answer input
            Constraint::Length(1), // Countdown
            Constraint::Min(2),    // Result
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let label = &view.controller.chosen_label().text;
    let file_title = Line::from(vec![
        Span::raw(" File"),
        Span::styled(label.as_str(), Theme::chosen_label()),
        Span::raw(" "),
    ]);
    render_input(
        frame,
        rows[0],
        file_title,
        &view.path_input,
        focused_form && state.focus.field == Field::FilePath && !state.dialog.is_open(),
    );
    render_input(
        frame,
        rows[1],
        Line::from(" Answer "),
        &view.answer_input,
        focused_form && state.focus.field == Field::Answer && !state.dialog.is_open(),
    );

    let countdown = &view.controller.countdown().text;
    let countdown_style = if countdown == ERROR_TEXT {
        Theme::error()
    } else {
        Theme::countdown()
    };
    frame.render_widget(
        Paragraph::new(countdown.as_str()).style(countdown_style),
        rows[2],
    );

    let result_style = match view.controller.phase() {
        Phase::Resolved(Resolution::Success) => Theme::success(),
        Phase::Resolved(Resolution::Failure) => Theme::failure(),
        Phase::Resolved(Resolution::Unrecognized) => Theme::unrecognized(),
        _ => Theme::input_text(),
    };
    frame.render_widget(
        Paragraph::new(view.controller.result().text.as_str())
            .style(result_style)
            .wrap(Wrap { trim: true }),
        rows[3],
    );

    let hint = format!(
        "max {}MB · Enter: select/submit · Ctrl-S: submit",
        view.controller.max_upload_mb()
    );
    frame.render_widget(Paragraph::new(hint).style(Theme::hint()), rows[4]);
}

fn render_input(frame: &mut Frame, area: Rect, title: Line, input: &TextInput, focused: bool) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused { Theme::border_focused() } else { Theme::border() });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if focused {
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(input.text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        // Chevron "❯ " is 2 columns wide
        let column = u16::try_from(input.cursor_column()).unwrap_or(u16::MAX);
        let cursor_x = inner.x.saturating_add(2).saturating_add(column);
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    } else {
        frame.render_widget(
            Paragraph::new(input.text.as_str()).style(Theme::input_text()),
            inner,
        );
    }
}
