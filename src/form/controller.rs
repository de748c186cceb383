//! Per-form submit lifecycle.
//!
//! ```text
//! Idle --submit--> CountingDown --response--> Resolved(..)
//!                      ^                          |
//!                      +---------submit-----------+
//! ```
//!
//! The countdown is cosmetic: it runs on its own repeating timer and may
//! expire before or after the response arrives. Any response, or a new
//! submit, cancels it.

use crate::error::{RequestError, ValidationError};
use crate::form::element::{FormElement, FormId, SelectedFile};
use crate::form::ports::{Notifier, Scheduler, TimerId};
use crate::form::result::{Outcome, UploadResult};
use crate::form::validation;
use crate::upload::{FilePart, UploadRequest};
use std::time::Duration;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const EXPIRED_TEXT: &str = "Time is up!";
pub const ERROR_TEXT: &str = "Error waiting for result.";

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Success,
    Failure,
    Unrecognized,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    CountingDown,
    Resolved(Resolution),
}

/// A named text region owned by one controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub id: String,
    pub text: String,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
        }
    }
}

/// Identifiers of the regions a controller writes to.
#[derive(Debug, Clone)]
pub struct RegionIds {
    pub countdown: String,
    pub result: String,
    pub chosen_label: String,
}

pub struct FormSubmissionController {
    id: FormId,
    form: FormElement,
    max_upload_mb: u64,
    countdown: Region,
    result: Region,
    chosen_label: Region,
    phase: Phase,
    remaining: i64,
    timer: Option<TimerId>,
}

impl FormSubmissionController {
    pub fn new(id: FormId, form: FormElement, regions: RegionIds, max_upload_mb: u64) -> Self {
        Self {
            id,
            form,
            max_upload_mb,
            countdown: Region::new(regions.countdown),
            result: Region::new(regions.result),
            chosen_label: Region::new(regions.chosen_label),
            phase: Phase::Idle,
            remaining: 0,
            timer: None,
        }
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn form(&self) -> &FormElement {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormElement {
        &mut self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn countdown(&self) -> &Region {
        &self.countdown
    }

    pub fn result(&self) -> &Region {
        &self.result
    }

    pub fn chosen_label(&self) -> &Region {
        &self.chosen_label
    }

    #[cfg(test)]
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    #[cfg(test)]
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_mb
    }

    /// File-input change. The label only follows a non-empty selection.
    pub fn choose_files(&mut self, files: Vec<SelectedFile>) {
        if let Some(first) = files.first() {
            self.chosen_label.text = format!(" - {}", first.name);
        }
        self.form.file_input.files = files;
    }

    /// Validate and, if the file is acceptable, start a new countdown and
    /// return the request to send. A rejected submit alerts through
    /// `notifier` and leaves all regions and any running countdown alone.
    pub fn submit<S, N>(&mut self, scheduler: &mut S, notifier: &mut N) -> Option<UploadRequest>
    where
        S: Scheduler + ?Sized,
        N: Notifier + ?Sized,
    {
        if let Err(e) = validation::check_file_size(self.form.file_input.first(), self.max_upload_mb) {
            let ValidationError::FileTooLarge { size, max_mb } = &e;
            tracing::info!(form = %self.form.id, size, max_mb, "submission rejected: file too large");
            notifier.alert(&e.to_string());
            return None;
        }

        self.cancel_countdown(scheduler);
        self.remaining = self.form.countdown_seconds();
        self.show_remaining();
        self.result.text.clear();
        self.timer = Some(scheduler.schedule_repeating(self.id, TICK_PERIOD));
        self.phase = Phase::CountingDown;

        tracing::info!(
            form = %self.form.id,
            countdown = self.remaining,
            url = %self.form.action,
            "submitting"
        );

        Some(self.build_request())
    }

    /// One countdown tick. Ticks from a timer this controller no longer owns
    /// are dropped.
    pub fn tick<S>(&mut self, timer: TimerId, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.timer != Some(timer) {
            tracing::trace!(form = %self.form.id, ?timer, "stale tick ignored");
            return;
        }
        self.remaining -= 1;
        if self.remaining >= 0 {
            self.show_remaining();
        } else {
            self.cancel_countdown(scheduler);
            self.countdown.text = EXPIRED_TEXT.to_string();
            tracing::debug!(form = %self.form.id, region = %self.countdown.id, "countdown expired");
        }
    }

    /// Apply the outcome of an upload.
    pub fn resolve<S>(&mut self, response: Result<UploadResult, RequestError>, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.cancel_countdown(scheduler);
        match response {
            Ok(result) => {
                let resolution = match result.outcome() {
                    Outcome::Success => Resolution::Success,
                    Outcome::Failure => Resolution::Failure,
                    Outcome::Unrecognized(code) => {
                        tracing::warn!(form = %self.form.id, %code, "unrecognized complete code");
                        Resolution::Unrecognized
                    }
                };
                self.result.text = result.message();
                self.countdown.text.clear();
                tracing::debug!(form = %self.form.id, region = %self.result.id, text = %self.result.text, "result shown");
                self.phase = Phase::Resolved(resolution);
            }
            Err(e) => {
                tracing::warn!(form = %self.form.id, "error waiting for result: {}", e);
                self.result.text.clear();
                self.countdown.text = ERROR_TEXT.to_string();
                self.phase = Phase::Resolved(Resolution::Error);
            }
        }
    }

    fn cancel_countdown<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
    }

    fn show_remaining(&mut self) {
        self.countdown.text = format!("Waiting for Result: {} seconds", self.remaining);
    }

    fn build_request(&self) -> UploadRequest {
        let file = self.form.file_input.first().map(|f| FilePart {
            field: self.form.file_input.id.clone(),
            path: f.path.clone(),
            file_name: f.name.clone(),
        });
        UploadRequest {
            form: self.id,
            method: self.form.method.clone(),
            url: self.form.action.clone(),
            fields: self.form.fields.clone(),
            file,
        }
    }
}
