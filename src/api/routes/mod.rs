pub mod health;
pub mod table;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

/// Create the main API router
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/sessions", create_table_router(state.clone()))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

/// Create table router
fn create_table_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(table::open_table))
        .route(
            "/:sessionId",
            get(table::view_table).delete(table::close_table),
        )
        .route("/:sessionId/hit", post(table::hit))
        .route("/:sessionId/stand", post(table::stand))
        .route("/:sessionId/restart", post(table::restart))
        .with_state(state)
}
