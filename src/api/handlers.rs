//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, StatusResponse};

/// Handle GET /countdown - Return the current snapshot
pub async fn countdown_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let countdown = &state.countdown;
    Json(ApiResponse::new(
        countdown.status(),
        "Current countdown snapshot".to_string(),
        countdown.snapshot(),
    ))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.start() {
        Ok(delta) => {
            info!("Start endpoint called - countdown {:?}", state.countdown.status());
            Ok(Json(ApiResponse::new(
                state.countdown.status(),
                "Countdown started".to_string(),
                delta,
            )))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let delta = state.pause();
    info!("Pause endpoint called - {}ms remaining", delta.total());
    Json(ApiResponse::new(
        state.countdown.status(),
        "Countdown paused".to_string(),
        delta,
    ))
}

/// Handle GET /status - Return countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        status: state.countdown.status(),
        delta: state.countdown.snapshot(),
        target: state.target_time(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
