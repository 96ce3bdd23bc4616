//! Competitor read and soft-delete routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use dealerscope_db::{deactivate_competitor, list_active_competitors, DbError};

use super::{error_body, AppState};

pub(super) async fn list_client_competitors(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Response {
    match list_active_competitors(&state.pool, client_id).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(error) => {
            tracing::error!(%client_id, %error, "failed to list competitors");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "database query failed")
        }
    }
}

pub(super) async fn remove_competitor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match deactivate_competitor(&state.pool, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(DbError::NotFound) => error_body(StatusCode::NOT_FOUND, "Competitor not found"),
        Err(error) => {
            tracing::error!(id, %error, "failed to deactivate competitor");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "database query failed")
        }
    }
}
