use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::dto::{ErrorResponse, OpenTableResponse, TableResponse};
use crate::api::AppState;
use crate::application::table::{
    CloseTable, CloseTableInput, OpenTable, PlayerHit, PlayerHitInput, PlayerStand,
    PlayerStandInput, RestartTable, RestartTableInput, TableError, ViewTable, ViewTableInput,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn table_error(e: TableError) -> ApiError {
    let (status, code) = match &e {
        TableError::SessionNotFound => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
        TableError::Deck(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DECK_EXHAUSTED"),
        TableError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SESSION_STORE_ERROR"),
    };

    if status.is_server_error() {
        tracing::error!("Table request failed: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: code.to_string(),
        }),
    )
}

pub async fn open_table(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<OpenTableResponse>), ApiError> {
    let output = OpenTable::new(state.session_repo.clone())
        .execute()
        .await
        .map_err(table_error)?;

    Ok((
        StatusCode::CREATED,
        Json(OpenTableResponse {
            success: true,
            session_id: output.session_id,
        }),
    ))
}

pub async fn view_table(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TableResponse>, ApiError> {
    let snapshot = ViewTable::new(state.session_repo.clone())
        .execute(ViewTableInput { session_id })
        .await
        .map_err(table_error)?;

    Ok(Json(snapshot.into()))
}

pub async fn hit(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TableResponse>, ApiError> {
    let snapshot = PlayerHit::new(state.session_repo.clone(), state.commentator.clone())
        .execute(PlayerHitInput { session_id })
        .await
        .map_err(table_error)?;

    Ok(Json(snapshot.into()))
}

pub async fn stand(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TableResponse>, ApiError> {
    let snapshot = PlayerStand::new(state.session_repo.clone(), state.commentator.clone())
        .execute(PlayerStandInput { session_id })
        .await
        .map_err(table_error)?;

    Ok(Json(snapshot.into()))
}

pub async fn restart(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TableResponse>, ApiError> {
    let snapshot = RestartTable::new(state.session_repo.clone())
        .execute(RestartTableInput { session_id })
        .await
        .map_err(table_error)?;

    Ok(Json(snapshot.into()))
}

pub async fn close_table(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    CloseTable::new(state.session_repo.clone())
        .execute(CloseTableInput { session_id })
        .await
        .map_err(table_error)?;

    Ok(StatusCode::NO_CONTENT)
}
