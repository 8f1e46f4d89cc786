//! Remaining-time breakdown

use serde::{Deserialize, Serialize};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Structured remaining time produced by one calculation.
///
/// Every field is derived from `total`; deserialization reads `total` only
/// and recomputes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RemainingMillis")]
pub struct TimeDelta {
    total: i64,
    milliseconds: i64,
    seconds: i64,
    minutes: i64,
    hours: i64,
    days: i64,
    completed: bool,
}

#[derive(Deserialize)]
struct RemainingMillis {
    total: i64,
}

impl From<RemainingMillis> for TimeDelta {
    fn from(remaining: RemainingMillis) -> Self {
        Self::from_total(remaining.total)
    }
}

impl TimeDelta {
    /// Decompose a remaining-millisecond count, clamping negatives to zero
    pub fn from_total(total: i64) -> Self {
        let total = total.max(0);

        Self {
            total,
            milliseconds: total % MILLIS_PER_SECOND,
            seconds: (total / MILLIS_PER_SECOND) % 60,
            minutes: (total / MILLIS_PER_MINUTE) % 60,
            hours: (total / MILLIS_PER_HOUR) % 24,
            days: total / MILLIS_PER_DAY,
            completed: total <= 0,
        }
    }

    /// A finished countdown
    pub fn zero() -> Self {
        Self::from_total(0)
    }

    /// Milliseconds remaining, never negative
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn milliseconds(&self) -> i64 {
        self.milliseconds
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Recombine the components with their unit weights
    pub fn recombined(&self) -> i64 {
        self.days * MILLIS_PER_DAY
            + self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
            + self.milliseconds
    }
}

impl Default for TimeDelta {
    fn default() -> Self {
        Self::zero()
    }
}
