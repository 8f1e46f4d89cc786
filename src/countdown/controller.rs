//! Countdown controller: play/pause state and the tick loop

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tracing::{debug, error, info};

use super::scheduler::{Scheduler, TokioScheduler};
use crate::{
    delta::{Clock, SystemClock, Target, TimeDelta},
    error::CountdownError,
    state::{CountdownStatus, Session},
};

/// Nominal spacing between ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Lifecycle callback receiving the freshly computed snapshot
pub type Callback = Box<dyn Fn(&TimeDelta) + Send + Sync>;

/// Construction options for a [`Countdown`]
pub struct CountdownOptions {
    pub auto_start: bool,
    on_start: Option<Callback>,
    on_tick: Option<Callback>,
    on_complete: Option<Callback>,
}

impl CountdownOptions {
    pub fn new() -> Self {
        Self {
            auto_start: true,
            on_start: None,
            on_tick: None,
            on_complete: None,
        }
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn on_start(mut self, f: impl Fn(&TimeDelta) + Send + Sync + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_tick(mut self, f: impl Fn(&TimeDelta) + Send + Sync + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl Fn(&TimeDelta) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CountdownOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownOptions")
            .field("auto_start", &self.auto_start)
            .field("on_start", &self.on_start.is_some())
            .field("on_tick", &self.on_tick.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

struct Callbacks {
    on_start: Option<Callback>,
    on_tick: Option<Callback>,
    on_complete: Option<Callback>,
}

fn fire(callback: &Option<Callback>, delta: &TimeDelta) {
    if let Some(callback) = callback {
        callback(delta);
    }
}

struct Inner {
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    callbacks: Callbacks,
    session: Mutex<Session>,
}

/// A single countdown toward a fixed target.
///
/// Dropping the countdown cancels its pending tick.
pub struct Countdown {
    inner: Arc<Inner>,
}

/// Create a countdown on the wall clock, ticking on the current tokio runtime
pub fn create_countdown(
    target: impl Into<Target>,
    options: CountdownOptions,
) -> Result<Countdown, CountdownError> {
    let scheduler = TokioScheduler::current()?;
    Countdown::with_runtime(target, options, Arc::new(SystemClock), Arc::new(scheduler))
}

impl Countdown {
    /// Create a countdown with an explicit clock and scheduling substrate
    pub fn with_runtime(
        target: impl Into<Target>,
        options: CountdownOptions,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, CountdownError> {
        let target = target.into().to_epoch_millis()?;
        let session = Session::new(target, clock.now());
        let auto_start = options.auto_start;

        let countdown = Self {
            inner: Arc::new(Inner {
                clock,
                scheduler,
                callbacks: Callbacks {
                    on_start: options.on_start,
                    on_tick: options.on_tick,
                    on_complete: options.on_complete,
                },
                session: Mutex::new(session),
            }),
        };
        debug!("Created countdown targeting {}", target);

        if auto_start {
            countdown.start()?;
        }
        Ok(countdown)
    }

    /// Last computed snapshot
    pub fn snapshot(&self) -> TimeDelta {
        self.inner.session().current
    }

    pub fn status(&self) -> CountdownStatus {
        self.inner.session().status
    }

    pub fn is_playing(&self) -> bool {
        self.inner.session().is_playing()
    }

    /// Target as epoch milliseconds
    pub fn target(&self) -> i64 {
        self.inner.session().target()
    }

    /// Begin or resume counting. Does nothing while already running.
    pub fn start(&self) -> Result<(), CountdownError> {
        Inner::start(&self.inner)
    }

    /// Stop counting, keeping the remaining time. Does nothing unless running.
    pub fn pause(&self) {
        self.inner.pause();
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session();
        f.debug_struct("Countdown")
            .field("target", &session.target())
            .field("status", &session.status)
            .field("current", &session.current)
            .finish()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(this: &Arc<Self>) -> Result<(), CountdownError> {
        let (delta, epoch) = {
            let mut session = this.session();
            if session.is_playing() {
                debug!("Countdown already running, ignoring start");
                return Ok(());
            }

            let now = this.clock.now();
            session.offset += now - session.pause_anchor;
            session.status = CountdownStatus::Running;
            session.epoch += 1;
            (session.refresh(now), session.epoch)
        };

        info!("Countdown started with {}ms remaining", delta.total());
        fire(&this.callbacks.on_start, &delta);

        let mut session = this.session();
        if session.epoch != epoch || !session.is_playing() {
            debug!("Countdown left running state during on_start");
            return Ok(());
        }

        if delta.completed() {
            let now = this.clock.now();
            session.stop(CountdownStatus::Completed, now);
            drop(session);
            info!("Countdown target already reached");
            fire(&this.callbacks.on_complete, &delta);
            return Ok(());
        }

        if let Err(e) = Self::arm(this, &mut session, epoch) {
            let now = this.clock.now();
            session.stop(CountdownStatus::Idle, now);
            session.epoch += 1;
            return Err(e);
        }
        Ok(())
    }

    fn pause(&self) {
        let pending = {
            let mut session = self.session();
            if !session.is_playing() {
                debug!("Countdown not running, ignoring pause");
                return;
            }

            let now = self.clock.now();
            session.epoch += 1;
            let pending = session.stop(CountdownStatus::Idle, now);
            info!("Countdown paused with {}ms remaining", session.current.total());
            pending
        };

        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }

    /// Replace any pending timer with one firing a tick for `epoch`
    fn arm(this: &Arc<Self>, session: &mut Session, epoch: u64) -> Result<(), CountdownError> {
        if let Some(previous) = session.pending.take() {
            this.scheduler.cancel(previous);
        }

        let weak: Weak<Self> = Arc::downgrade(this);
        let id = this.scheduler.schedule(
            TICK_INTERVAL,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::tick(&inner, epoch);
                }
            }),
        )?;
        session.pending = Some(id);
        Ok(())
    }

    fn tick(this: &Arc<Self>, epoch: u64) {
        let delta = {
            let mut session = this.session();
            if session.epoch != epoch || !session.is_playing() {
                debug!("Discarding stale tick");
                return;
            }

            session.pending = None;
            let now = this.clock.now();
            let delta = session.refresh(now);
            if delta.completed() {
                session.stop(CountdownStatus::Completed, now);
            }
            delta
        };

        if delta.completed() {
            info!("Countdown completed");
            fire(&this.callbacks.on_complete, &delta);
            return;
        }

        fire(&this.callbacks.on_tick, &delta);

        let mut session = this.session();
        if session.epoch != epoch || !session.is_playing() {
            return;
        }
        if let Err(e) = Self::arm(this, &mut session, epoch) {
            error!("Failed to schedule next tick, countdown stopped: {}", e);
            let now = this.clock.now();
            session.stop(CountdownStatus::Idle, now);
            session.epoch += 1;
        }
    }

    fn teardown(&self) {
        let pending = {
            let mut session = self.session();
            session.epoch += 1;
            if session.is_playing() {
                let now = self.clock.now();
                session.stop(CountdownStatus::Idle, now)
            } else {
                session.pending.take()
            }
        };

        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }
}
