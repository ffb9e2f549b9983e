//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    stored: usize,
    reload_enabled: bool,
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reload_enabled = state.news_service.reload_enabled();

    match state.news_service.storage().count() {
        Ok(stored) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                stored,
                reload_enabled,
            }),
        ),
        Err(e) => {
            error!("Health check could not read storage: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    stored: 0,
                    reload_enabled,
                }),
            )
        }
    }
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
