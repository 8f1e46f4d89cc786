//! Per-countdown mutable state

use serde::{Deserialize, Serialize};

use crate::{countdown::scheduler::TimerId, delta::TimeDelta};

/// Play state of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStatus {
    Idle,
    Running,
    Completed,
}

/// Everything one countdown instance mutates
#[derive(Debug)]
pub struct Session {
    target: i64,
    pub status: CountdownStatus,
    /// Instant of the last pause, completion or construction
    pub pause_anchor: i64,
    /// Milliseconds spent not running, carried across pause/resume
    pub offset: i64,
    pub current: TimeDelta,
    pub pending: Option<TimerId>,
    /// Bumped on every start, pause and teardown; ticks from older epochs are stale
    pub epoch: u64,
}

impl Session {
    pub fn new(target: i64, now: i64) -> Self {
        Self {
            target,
            status: CountdownStatus::Idle,
            pause_anchor: now,
            offset: 0,
            current: crate::delta::delta_at(target, 0, now),
            pending: None,
            epoch: 0,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_playing(&self) -> bool {
        self.status == CountdownStatus::Running
    }

    /// Recompute and cache the snapshot at `now`
    pub fn refresh(&mut self, now: i64) -> TimeDelta {
        self.current = crate::delta::delta_at(self.target, self.offset, now);
        self.current
    }

    /// Leave `Running` with a snapshot taken at `now`, anchoring future
    /// offset accumulation there
    pub fn stop(&mut self, status: CountdownStatus, now: i64) -> Option<TimerId> {
        self.refresh(now);
        self.status = status;
        self.pause_anchor = now;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_with_initial_snapshot() {
        let session = Session::new(10_000, 4_000);
        assert_eq!(session.status, CountdownStatus::Idle);
        assert_eq!(session.current.total(), 6_000);
        assert_eq!(session.pause_anchor, 4_000);
        assert!(!session.is_playing());
    }

    #[test]
    fn refresh_applies_offset() {
        let mut session = Session::new(10_000, 0);
        session.offset = 2_000;
        assert_eq!(session.refresh(5_000).total(), 7_000);
        assert_eq!(session.current.total(), 7_000);
    }

    #[test]
    fn stop_releases_pending_timer() {
        let mut session = Session::new(10_000, 0);
        session.status = CountdownStatus::Running;
        session.pending = Some(TimerId(7));
        assert_eq!(session.stop(CountdownStatus::Idle, 3_000), Some(TimerId(7)));
        assert_eq!(session.pending, None);
        assert_eq!(session.pause_anchor, 3_000);
        assert_eq!(session.current.total(), 7_000);
        assert!(!session.is_playing());
    }
}
