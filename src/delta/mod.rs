//! Delta calculation
//!
//! Pure conversion of a target instant plus an elapsed-time offset into a
//! [`TimeDelta`]. The clock is injected so callers can freeze or steer time.

pub mod clock;
pub mod target;
pub mod time_delta;

pub use clock::{Clock, ManualClock, SystemClock};
pub use target::Target;
pub use time_delta::TimeDelta;

use crate::error::CountdownError;

/// Remaining time toward `target`, shifted by `offset` milliseconds already
/// spent paused, as seen by `clock`
pub fn calculate_delta(
    target: impl Into<Target>,
    offset: i64,
    clock: &dyn Clock,
) -> Result<TimeDelta, CountdownError> {
    let target = target.into().to_epoch_millis()?;
    Ok(delta_at(target, offset, clock.now()))
}

/// [`calculate_delta`] with no offset against the wall clock
pub fn calculate_delta_now(target: impl Into<Target>) -> Result<TimeDelta, CountdownError> {
    calculate_delta(target, 0, &SystemClock)
}

/// Arithmetic core on already-normalized values
pub(crate) fn delta_at(target: i64, offset: i64, now: i64) -> TimeDelta {
    let remaining = target.saturating_add(offset).saturating_sub(now);
    TimeDelta::from_total(remaining)
}
