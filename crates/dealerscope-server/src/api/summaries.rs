//! Market summary history routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use dealerscope_db::list_market_summaries;

use super::{error_body, normalize_limit, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SummariesQuery {
    limit: Option<i64>,
}

pub(super) async fn list_client_summaries(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Query(query): Query<SummariesQuery>,
) -> Response {
    let limit = normalize_limit(query.limit);
    match list_market_summaries(&state.pool, client_id, limit).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(error) => {
            tracing::error!(%client_id, %error, "failed to list market summaries");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "database query failed")
        }
    }
}
