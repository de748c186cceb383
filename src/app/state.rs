use crate::config::AppConfig;
use crate::form::controller::{FormSubmissionController, RegionIds};
use crate::form::element::{FormElement, FormId, SelectedFile};
use crate::form::ports::{Notifier, Scheduler};
use crate::upload::UploadRequest;
use chrono::Local;
use std::path::Path;

/// Single-line editable text field.
#[derive(Debug, Default)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FilePath,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub form: FormId,
    pub field: Field,
}

/// Modal alert. While a message is set the UI swallows all input until the
/// user dismisses it.
#[derive(Debug, Default)]
pub struct Dialog {
    pub message: Option<String>,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }
}

impl Notifier for Dialog {
    fn alert(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

pub struct FormView {
    pub title: String,
    pub answer_field: String,
    pub controller: FormSubmissionController,
    pub path_input: TextInput,
    pub answer_input: TextInput,
}

pub struct AppState {
    pub config: AppConfig,
    pub forms: Vec<FormView>,
    pub focus: Focus,
    pub dialog: Dialog,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let action = config.form_action();
        let forms = config
            .forms
            .iter()
            .enumerate()
            .map(|(id, cfg)| FormView {
                title: cfg.title.clone(),
                answer_field: cfg.answer_field.clone(),
                controller: FormSubmissionController::new(
                    id,
                    FormElement::from_config(cfg, action.clone()),
                    RegionIds {
                        countdown: cfg.countdown_id.clone(),
                        result: cfg.result_id.clone(),
                        chosen_label: cfg.chosen_label_id.clone(),
                    },
                    cfg.max_upload_mb,
                ),
                path_input: TextInput::default(),
                answer_input: TextInput::default(),
            })
            .collect();

        Self {
            config,
            forms,
            focus: Focus {
                form: 0,
                field: Field::FilePath,
            },
            dialog: Dialog::default(),
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    pub fn form(&self, id: FormId) -> Option<&FormView> {
        self.forms.get(id)
    }

    pub fn form_mut(&mut self, id: FormId) -> Option<&mut FormView> {
        self.forms.get_mut(id)
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        let focus = self.focus;
        self.forms.get_mut(focus.form).map(|f| match focus.field {
            Field::FilePath => &mut f.path_input,
            Field::Answer => &mut f.answer_input,
        })
    }

    pub fn cycle_focus(&mut self) {
        let count = self.forms.len().max(1);
        self.focus = match self.focus.field {
            Field::FilePath => Focus {
                form: self.focus.form,
                field: Field::Answer,
            },
            Field::Answer => Focus {
                form: (self.focus.form + 1) % count,
                field: Field::FilePath,
            },
        };
        self.dirty = true;
    }

    pub fn cycle_focus_back(&mut self) {
        let count = self.forms.len().max(1);
        self.focus = match self.focus.field {
            Field::Answer => Focus {
                form: self.focus.form,
                field: Field::FilePath,
            },
            Field::FilePath => Focus {
                form: (self.focus.form + count - 1) % count,
                field: Field::Answer,
            },
        };
        self.dirty = true;
    }

    /// File-input change for `form`. An empty path clears the selection.
    pub fn choose_file(&mut self, form: FormId, path: &str) -> std::io::Result<()> {
        let Some(view) = self.forms.get_mut(form) else {
            return Ok(());
        };
        let path = path.trim();
        let files = if path.is_empty() {
            Vec::new()
        } else {
            vec![SelectedFile::from_path(Path::new(path))?]
        };
        tracing::debug!(form, files = files.len(), "file input changed");
        view.controller.choose_files(files);
        self.dirty = true;
        Ok(())
    }

    /// Copy the answer into the form and hand it to the controller. The
    /// selected file is re-read first so the size check sees what will
    /// actually be uploaded.
    pub fn submit<S>(&mut self, form: FormId, scheduler: &mut S) -> Option<UploadRequest>
    where
        S: Scheduler + ?Sized,
    {
        let view = self.forms.get_mut(form)?;
        self.dirty = true;
        if let Err(e) = view.controller.form_mut().file_input.refresh() {
            tracing::warn!(form, "selected file unreadable: {}", e);
            self.dialog
                .alert(&format!("Cannot read the selected file: {}", e));
            return None;
        }
        let answer = view.answer_input.text.trim().to_string();
        view.controller
            .form_mut()
            .set_field(&view.answer_field, answer);
        view.controller.submit(scheduler, &mut self.dialog)
    }

    pub fn set_status(&mut self, text: String) {
        let stamp = Local::now().format("%H:%M:%S");
        self.status_message = Some(format!("[{}] {}", stamp, text));
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        format!("Server: {}", self.config.form_action())
    }
}
