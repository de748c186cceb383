//! Deterministic [`Scheduler`] for tests: time only moves when told to.

use crate::form::element::FormId;
use crate::form::ports::{Scheduler, TimerId};
use std::collections::BTreeMap;
use std::time::Duration;

struct Entry {
    form: FormId,
    period: Duration,
    next_fire: Duration,
}

#[derive(Default)]
pub struct VirtualClock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Entry>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward and return every firing in the window, ordered by
    /// fire time. The caller delivers them.
    pub fn advance(&mut self, by: Duration) -> Vec<(FormId, TimerId)> {
        self.now += by;
        let mut fired = Vec::new();
        for (id, entry) in self.timers.iter_mut() {
            while entry.next_fire <= self.now {
                fired.push((entry.next_fire, entry.form, *id));
                entry.next_fire += entry.period;
            }
        }
        fired.sort_by_key(|(at, _, id)| (*at, *id));
        fired.into_iter().map(|(_, form, id)| (form, id)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for VirtualClock {
    fn schedule_repeating(&mut self, form: FormId, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Entry {
                form,
                period,
                next_fire: self.now + period,
            },
        );
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }
}
