//! Timer registration substrate

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};
use tokio::{runtime::Handle, task::AbortHandle};
use tracing::trace;

use crate::error::CountdownError;

/// Work run once when a timer fires
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one registration with a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Something that can run a task after a delay and cancel it beforehand
pub trait Scheduler: Send + Sync {
    /// Register `task` to run once after `delay`
    fn schedule(&self, delay: Duration, task: Task) -> Result<TimerId, CountdownError>;

    /// Drop a registration; unknown or already-fired ids are ignored
    fn cancel(&self, id: TimerId);
}

/// Scheduler backed by tokio timers
#[derive(Debug)]
pub struct TokioScheduler {
    handle: Handle,
    next_id: AtomicU64,
    timers: Arc<Mutex<HashMap<TimerId, AbortHandle>>>,
}

impl TokioScheduler {
    /// Bind to the runtime of the calling context
    pub fn current() -> Result<Self, CountdownError> {
        let handle = Handle::try_current()
            .map_err(|e| CountdownError::scheduler(format!("no tokio runtime available: {}", e)))?;
        Ok(Self::from_handle(handle))
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            next_id: AtomicU64::new(1),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Result<TimerId, CountdownError> {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let timers = Arc::clone(&self.timers);

        // Hold the map lock across spawn so the task cannot remove itself
        // before it has been inserted.
        let mut map = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let registered = timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id)
                .is_some();
            if registered {
                task();
            }
        });
        map.insert(id, join.abort_handle());
        trace!("Scheduled timer {:?} in {:?}", id, delay);

        Ok(id)
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.timers.lock().unwrap_or_else(PoisonError::into_inner).remove(&id);
        if let Some(abort) = removed {
            abort.abort();
            trace!("Cancelled timer {:?}", id);
        }
    }
}
