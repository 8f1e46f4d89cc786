//! Virtual-time scheduler for tests and simulations

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use super::scheduler::{Scheduler, Task, TimerId};
use crate::{
    delta::{Clock, ManualClock},
    error::CountdownError,
};

#[derive(Default)]
struct Registry {
    next_id: u64,
    queue: BTreeMap<(i64, TimerId), Task>,
    deadlines: HashMap<TimerId, i64>,
    registered: usize,
    cancelled: usize,
    peak_pending: usize,
    rejecting: bool,
}

/// Scheduler whose timers fire only when [`ManualScheduler::advance`] moves
/// its [`ManualClock`] past their deadlines
pub struct ManualScheduler {
    clock: ManualClock,
    registry: Mutex<Registry>,
}

impl ManualScheduler {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move time forward, firing every due timer in deadline order with the
    /// clock set to that timer's deadline
    pub fn advance(&self, millis: i64) {
        let until = self.clock.now() + millis;

        loop {
            let next = {
                let mut registry = self.registry();
                let due = match registry.queue.keys().next() {
                    Some(&(at, id)) if at <= until => (at, id),
                    _ => break,
                };
                registry.deadlines.remove(&due.1);
                registry.queue.remove(&due).map(|task| (due.0, task))
            };

            if let Some((at, task)) = next {
                self.clock.set(at);
                task();
            }
        }

        self.clock.set(until);
    }

    /// Make subsequent registrations fail
    pub fn reject_registrations(&self, rejecting: bool) {
        self.registry().rejecting = rejecting;
    }

    /// Timers neither fired nor cancelled
    pub fn pending(&self) -> usize {
        self.registry().queue.len()
    }

    /// Highest number of simultaneously pending timers seen so far
    pub fn peak_pending(&self) -> usize {
        self.registry().peak_pending
    }

    /// Total successful registrations
    pub fn registered(&self) -> usize {
        self.registry().registered
    }

    /// Registrations removed before firing
    pub fn cancelled(&self) -> usize {
        self.registry().cancelled
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<i64> {
        self.registry().queue.keys().next().map(|&(at, _)| at)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Result<TimerId, CountdownError> {
        let now = self.clock.now();
        let mut registry = self.registry();
        if registry.rejecting {
            return Err(CountdownError::scheduler("manual scheduler is rejecting registrations"));
        }

        registry.next_id += 1;
        let id = TimerId(registry.next_id);
        let at = now + delay.as_millis() as i64;

        registry.queue.insert((at, id), task);
        registry.deadlines.insert(id, at);
        registry.registered += 1;
        registry.peak_pending = registry.peak_pending.max(registry.queue.len());

        Ok(id)
    }

    fn cancel(&self, id: TimerId) {
        let mut registry = self.registry();
        if let Some(at) = registry.deadlines.remove(&id) {
            registry.queue.remove(&(at, id));
            registry.cancelled += 1;
        }
    }
}
