//! Countdown controller and its scheduling substrate
//!
//! The controller recomputes the remaining time on every start and on a
//! fixed one-second cadence while running, handing each snapshot to the
//! consumer's callbacks. Timers come from a [`Scheduler`] so tests can drive
//! time with [`ManualScheduler`] instead of waiting on the wall clock.

pub mod controller;
pub mod manual;
pub mod scheduler;

pub use controller::{create_countdown, Callback, Countdown, CountdownOptions, TICK_INTERVAL};
pub use manual::ManualScheduler;
pub use scheduler::{Scheduler, Task, TimerId, TokioScheduler};
