//! Error types for the countdown engine

use thiserror::Error;

/// Failures surfaced by the countdown engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountdownError {
    /// The target could not be normalized to an epoch-millisecond value
    #[error("invalid countdown target: {0}")]
    InvalidTarget(String),

    /// The scheduling substrate refused or could not register a timer
    #[error("scheduler failure: {0}")]
    Scheduler(String),
}

impl CountdownError {
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget(message.into())
    }

    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::Scheduler(message.into())
    }
}
