//! Countdown Clock - a pausable countdown engine
//!
//! [`delta`] turns a target instant and an elapsed-time offset into a
//! [`TimeDelta`]; [`countdown`] drives that calculation on a one-second
//! cadence with start/pause control and lifecycle callbacks. The remaining
//! modules make up the HTTP demo consumer shipped as the binary.

pub mod config;
pub mod error;
pub mod delta;
pub mod countdown;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::CountdownError;
pub use delta::{calculate_delta, calculate_delta_now, Clock, ManualClock, SystemClock, Target, TimeDelta};
pub use countdown::{create_countdown, Countdown, CountdownOptions, ManualScheduler, Scheduler, TokioScheduler};
pub use state::{AppState, CountdownStatus};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
