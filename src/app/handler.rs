use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::form::ports::Scheduler;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event<S>(state: &mut AppState, scheduler: &mut S, event: AppEvent) -> Vec<Action>
where
    S: Scheduler + ?Sized,
{
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::CountdownTick { form, timer } => {
            if let Some(view) = state.form_mut(form) {
                view.controller.tick(timer, scheduler);
                state.dirty = true;
            }
            vec![]
        }
        AppEvent::UploadFinished { form, result } => {
            if let Some(view) = state.form_mut(form) {
                view.controller.resolve(result, scheduler);
                let title = view.title.clone();
                state.set_status(format!("{}: result received", title));
            }
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // The alert dialog captures all input until dismissed
    if state.dialog.is_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            state.dialog.dismiss();
        }
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        return vec![Action::Submit {
            form: state.focus.form,
        }];
    }

    match key.code {
        KeyCode::Tab => {
            state.cycle_focus();
            vec![]
        }
        KeyCode::BackTab => {
            state.cycle_focus_back();
            vec![]
        }
        KeyCode::Enter => {
            let form = state.focus.form;
            match state.focus.field {
                Field::FilePath => {
                    let path = state
                        .form(form)
                        .map(|f| f.path_input.text.clone())
                        .unwrap_or_default();
                    vec![Action::ChooseFile { form, path }]
                }
                Field::Answer => vec![Action::Submit { form }],
            }
        }
        _ => {
            if let Some(input) = state.focused_input() {
                edit_input(input, key);
            }
            vec![]
        }
    }
}

fn edit_input(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
        KeyCode::Backspace => input.delete_back(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::RequestError;
    use crate::form::controller::{Phase, Resolution, ERROR_TEXT};
    use crate::timer::virtual_clock::VirtualClock;
    use std::time::Duration;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(state: &mut AppState, clock: &mut VirtualClock, text: &str) {
        for c in text.chars() {
            handle_event(state, clock, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_on_path_chooses_file() {
        let mut state = AppState::new(AppConfig::default());
        let mut clock = VirtualClock::new();
        type_text(&mut state, &mut clock, "input.txt");
        let actions = handle_event(&mut state, &mut clock, key(KeyCode::Enter));
        assert_eq!(
            actions,
            vec![Action::ChooseFile {
                form: 0,
                path: "input.txt".into()
            }]
        );
    }

    #[test]
    fn test_enter_on_answer_submits_focused_form() {
        let mut state = AppState::new(AppConfig::default());
        let mut clock = VirtualClock::new();
        handle_event(&mut state, &mut clock, key(KeyCode::Tab));
        handle_event(&mut state, &mut clock, key(KeyCode::Tab));
        handle_event(&mut state, &mut clock, key(KeyCode::Tab));
        type_text(&mut state, &mut clock, "42");
        assert_eq!(state.forms[1].answer_input.text, "42");
        assert!(state.forms[0].answer_input.text.is_empty());

        let actions = handle_event(&mut state, &mut clock, key(KeyCode::Enter));
        assert_eq!(actions, vec![Action::Submit { form: 1 }]);
        assert_eq!(
            handle_event(&mut state, &mut clock, ctrl('s')),
            vec![Action::Submit { form: 1 }]
        );
    }

    #[test]
    fn test_dialog_swallows_keys() {
        let mut state = AppState::new(AppConfig::default());
        let mut clock = VirtualClock::new();
        state.dialog.message = Some("too large".into());

        assert!(handle_event(&mut state, &mut clock, ctrl('s')).is_empty());
        type_text(&mut state, &mut clock, "abc");
        assert!(state.forms[0].path_input.text.is_empty());
        assert!(state.dialog.is_open());

        handle_event(&mut state, &mut clock, key(KeyCode::Esc));
        assert!(!state.dialog.is_open());
        assert_eq!(handle_event(&mut state, &mut clock, ctrl('c')), vec![Action::Quit]);
    }

    #[test]
    fn test_ticks_and_results_route_to_form() {
        let mut state = AppState::new(AppConfig::default());
        let mut clock = VirtualClock::new();
        state.submit(0, &mut clock).unwrap();
        state.submit(1, &mut clock).unwrap();

        for (form, timer) in clock.advance(Duration::from_secs(2)) {
            handle_event(&mut state, &mut clock, AppEvent::CountdownTick { form, timer });
        }
        assert_eq!(state.forms[0].controller.remaining(), 28);
        assert_eq!(state.forms[1].controller.remaining(), 28);

        handle_event(
            &mut state,
            &mut clock,
            AppEvent::UploadFinished {
                form: 1,
                result: Err(RequestError::Status(502)),
            },
        );
        assert_eq!(state.forms[1].controller.countdown().text, ERROR_TEXT);
        assert_eq!(
            state.forms[1].controller.phase(),
            &Phase::Resolved(Resolution::Error)
        );
        assert_eq!(state.forms[0].controller.phase(), &Phase::CountingDown);
        assert_eq!(clock.active_count(), 1);
    }
}
