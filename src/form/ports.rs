use crate::form::element::FormId;
use std::time::Duration;

/// Identity of a scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Schedules repeating callbacks for a form. Each firing is delivered back to
/// the owning controller as a tick carrying the [`TimerId`].
pub trait Scheduler {
    fn schedule_repeating(&mut self, form: FormId, period: Duration) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
}

/// Synchronous, blocking user notification (a modal dialog in the UI).
pub trait Notifier {
    fn alert(&mut self, message: &str);
}
