//! State management module
//!
//! Session state owned by each countdown, plus the application state the
//! HTTP consumer shares between handlers and background tasks.

pub mod app_state;
pub mod session;

// Re-export main types
pub use app_state::{AppState, CountdownEvent, CountdownUpdate};
pub use session::{CountdownStatus, Session};
