use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::AppState;
use crate::domain::repositories::SessionRepository;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    open_tables: usize,
    commentary_enabled: bool,
}

static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Record process start time
pub fn mark_start() {
    START_TIME.get_or_init(std::time::Instant::now);
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(std::time::Instant::now);
    let open_tables = state.session_repo.count().await.unwrap_or_else(|e| {
        tracing::warn!("Health check could not count tables: {}", e);
        0
    });

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: start.elapsed().as_secs(),
        open_tables,
        commentary_enabled: state.commentator.is_enabled(),
    })
}
