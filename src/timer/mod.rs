//! Countdown timers backed by the tokio runtime.
//!
//! Every firing is posted to the application event loop as
//! [`AppEvent::CountdownTick`], so ticks are handled in order with terminal
//! input and upload completions.

#[cfg(test)]
pub mod virtual_clock;

use crate::app::event::AppEvent;
use crate::form::element::FormId;
use crate::form::ports::{Scheduler, TimerId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct TokioScheduler {
    event_tx: mpsc::UnboundedSender<AppEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            event_tx,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, form: FormId, period: Duration) -> TimerId {
        let timer = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::CountdownTick { form, timer }).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(timer, handle);
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(handle) = self.tasks.remove(&timer) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
