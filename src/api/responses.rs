//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{delta::TimeDelta, state::CountdownStatus};

/// Response for the control endpoints and snapshot reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: CountdownStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub delta: TimeDelta,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: CountdownStatus, message: String, delta: TimeDelta) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            delta,
        }
    }
}

/// Error body returned alongside a failing status code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            error,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with countdown and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: CountdownStatus,
    pub delta: TimeDelta,
    pub target: Option<DateTime<Utc>>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
