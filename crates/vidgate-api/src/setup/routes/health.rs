//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns status string "ready", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "ready".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    /// RFC 3339
    pub timestamp: String,
    /// Seconds since the process started
    pub uptime: f64,
}

#[derive(Serialize)]
pub(super) struct ReadinessResponse {
    pub status: &'static str,
    pub extractor: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the extractor backend can run.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let extractor = run_check(
        READINESS_TIMEOUT,
        state.extractor.health_check(),
        "not_ready",
    )
    .await;

    if extractor == "ready" {
        (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                extractor,
            }),
        )
    } else {
        tracing::error!(extractor = %extractor, "Extractor readiness check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready",
                extractor,
            }),
        )
    }
}

/// Process health: always healthy while the server answers.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: state.started_at.elapsed().as_secs_f64(),
        }),
    )
}
