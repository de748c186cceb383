use crate::error::RequestError;
use crate::form::element::FormId;
use crate::form::ports::TimerId;
use crate::form::result::UploadResult;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// One second elapsed on a form's countdown timer
    CountdownTick { form: FormId, timer: TimerId },

    /// An upload task finished, successfully or not
    UploadFinished {
        form: FormId,
        result: Result<UploadResult, RequestError>,
    },
}
