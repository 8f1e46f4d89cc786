//! Application state shared by the HTTP consumer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

use crate::{
    countdown::{Countdown, CountdownOptions, Scheduler},
    delta::{Clock, Target, TimeDelta},
    error::CountdownError,
};

/// Which lifecycle callback produced an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownEvent {
    Created,
    Started,
    Tick,
    Completed,
}

/// A snapshot pushed to update subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownUpdate {
    pub event: CountdownEvent,
    pub delta: TimeDelta,
    pub timestamp: DateTime<Utc>,
}

impl CountdownUpdate {
    pub fn new(event: CountdownEvent, delta: TimeDelta) -> Self {
        Self {
            event,
            delta,
            timestamp: Utc::now(),
        }
    }
}

/// State shared between the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    pub countdown: Countdown,
    /// Fed by the countdown callbacks
    pub update_tx: Arc<watch::Sender<CountdownUpdate>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Build the countdown and wire its callbacks into the update channel
    pub fn new(
        port: u16,
        host: String,
        target: Target,
        auto_start: bool,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, CountdownError> {
        let initial = CountdownUpdate::new(CountdownEvent::Created, TimeDelta::zero());
        let (update_tx, _) = watch::channel(initial);
        let update_tx = Arc::new(update_tx);

        let options = CountdownOptions::new()
            .auto_start(auto_start)
            .on_start(publisher(&update_tx, CountdownEvent::Started))
            .on_tick(publisher(&update_tx, CountdownEvent::Tick))
            .on_complete(publisher(&update_tx, CountdownEvent::Completed));

        let countdown = Countdown::with_runtime(target, options, clock, scheduler)?;
        if !auto_start {
            update_tx.send_replace(CountdownUpdate::new(CountdownEvent::Created, countdown.snapshot()));
        }

        Ok(Self {
            countdown,
            update_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        })
    }

    /// Receive every update published after this call
    pub fn subscribe(&self) -> watch::Receiver<CountdownUpdate> {
        self.update_tx.subscribe()
    }

    /// Start or resume the countdown
    pub fn start(&self) -> Result<TimeDelta, CountdownError> {
        self.record_action("start");
        self.countdown.start()?;
        Ok(self.countdown.snapshot())
    }

    /// Pause the countdown
    pub fn pause(&self) -> TimeDelta {
        self.record_action("pause");
        self.countdown.pause();
        self.countdown.snapshot()
    }

    fn record_action(&self, action: &str) {
        info!("Countdown action requested: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Target as a UTC timestamp, if representable
    pub fn target_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.countdown.target())
    }
}

fn publisher(
    tx: &Arc<watch::Sender<CountdownUpdate>>,
    event: CountdownEvent,
) -> impl Fn(&TimeDelta) + Send + Sync + 'static {
    let tx = Arc::clone(tx);
    move |delta| {
        tx.send_replace(CountdownUpdate::new(event, *delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{countdown::ManualScheduler, delta::ManualClock, state::CountdownStatus};

    fn state_with(clock: &ManualClock, target: i64, auto_start: bool) -> (AppState, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new(clock.clone()));
        let state = AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Target::Millis(target),
            auto_start,
            Arc::new(clock.clone()),
            scheduler.clone(),
        )
        .unwrap();
        (state, scheduler)
    }

    #[test]
    fn callbacks_publish_updates() {
        let clock = ManualClock::new(0);
        let (state, scheduler) = state_with(&clock, 2_500, true);
        assert_eq!(state.update_tx.borrow().event, CountdownEvent::Started);

        let rx = state.subscribe();
        scheduler.advance(1_000);
        assert!(rx.has_changed().unwrap());
        let update = rx.borrow().clone();
        assert_eq!(update.event, CountdownEvent::Tick);
        assert_eq!(update.delta.total(), 1_500);

        scheduler.advance(2_000);
        assert_eq!(state.update_tx.borrow().event, CountdownEvent::Completed);
        assert_eq!(state.countdown.status(), CountdownStatus::Completed);
    }

    #[test]
    fn paused_start_publishes_initial_snapshot() {
        let clock = ManualClock::new(0);
        let (state, scheduler) = state_with(&clock, 60_000, false);
        let update = state.update_tx.borrow().clone();
        assert_eq!(update.event, CountdownEvent::Created);
        assert_eq!(update.delta.total(), 60_000);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn actions_are_recorded() {
        let clock = ManualClock::new(0);
        let (state, _scheduler) = state_with(&clock, 60_000, false);
        assert_eq!(state.get_last_action().0, None);

        state.start().unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));

        clock.advance(1_000);
        let delta = state.pause();
        assert_eq!(state.get_last_action().0.as_deref(), Some("pause"));
        assert_eq!(delta.total(), 59_000);
        assert!(state.get_last_action().1.is_some());
    }

    #[test]
    fn target_time_round_trips() {
        let clock = ManualClock::new(0);
        let (state, _scheduler) = state_with(&clock, 86_400_000, false);
        assert_eq!(state.target_time().unwrap().to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }
}
