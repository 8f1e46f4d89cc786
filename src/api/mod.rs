//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/countdown", get(countdown_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{countdown::ManualScheduler, delta::{ManualClock, Target}};

    const START: i64 = 1_700_000_000_000;

    fn app(auto_start: bool) -> (Router, Arc<AppState>, Arc<ManualScheduler>) {
        let clock = ManualClock::new(START);
        let scheduler = Arc::new(ManualScheduler::new(clock.clone()));
        let state = Arc::new(
            AppState::new(
                20554,
                "127.0.0.1".to_string(),
                Target::Millis(START + 3_600_000),
                auto_start,
                Arc::new(clock),
                scheduler.clone(),
            )
            .unwrap(),
        );
        (create_router(Arc::clone(&state)), state, scheduler)
    }

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn countdown_reports_snapshot() {
        let (router, _state, _scheduler) = app(true);
        let (status, body) = call(router, "GET", "/countdown").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["delta"]["hours"], 1);
        assert_eq!(body["delta"]["total"], 3_600_000);
    }

    #[tokio::test]
    async fn pause_then_start() {
        let (router, state, scheduler) = app(true);
        scheduler.advance(2_000);

        let (status, body) = call(router.clone(), "POST", "/pause").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["delta"]["total"], 3_598_000);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(10_000);
        let (status, body) = call(router, "POST", "/start").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["delta"]["total"], 3_598_000);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test]
    async fn start_failure_is_server_error() {
        let (router, state, scheduler) = app(false);
        scheduler.reject_registrations(true);

        let (status, body) = call(router, "POST", "/start").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("scheduler"));
        assert!(!state.countdown.is_playing());
    }

    #[tokio::test]
    async fn status_includes_target_and_server() {
        let (router, _state, _scheduler) = app(false);
        let (status, body) = call(router, "GET", "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["port"], 20554);
        assert_eq!(body["host"], "127.0.0.1");
        assert!(body["target"].as_str().unwrap().starts_with("2023-11-14T23:13:20"));
        assert!(body["last_action"].is_null());
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _state, _scheduler) = app(false);
        let (status, body) = call(router, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
