//! The discovery endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dealerscope_db::{CompetitorRow, MarketSummaryRow};
use dealerscope_discovery::{run_discovery, DiscoveryError, DiscoveryOutcome, DiscoveryRequest};
use dealerscope_places::Coordinate;

use super::{error_body, AppState};

/// All fields optional so that an incomplete body surfaces as the documented
/// 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DiscoverRequest {
    pub postal_code: Option<String>,
    pub client_id: Option<Uuid>,
    pub radius_miles: Option<f64>,
    pub business_types: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DiscoverResponse {
    pub success: bool,
    pub competitors: Vec<CompetitorRow>,
    pub market_analysis: MarketSummaryRow,
    pub search_metadata: SearchMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchMetadata {
    pub postal_code: String,
    pub coordinates: Coordinate,
    pub radius_miles: f64,
    pub total_found: usize,
    pub saved_count: usize,
}

pub(super) async fn discover(
    State(state): State<AppState>,
    Json(body): Json<DiscoverRequest>,
) -> Response {
    let postal_code = body
        .postal_code
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(postal_code), Some(client_id)) = (postal_code, body.client_id) else {
        return error_body(StatusCode::BAD_REQUEST, "Missing required fields");
    };

    let request = DiscoveryRequest {
        client_id,
        postal_code: postal_code.to_string(),
        radius_miles: body.radius_miles.unwrap_or(state.default_radius_miles),
        business_types: body.business_types,
    };

    match run_discovery(&state.pool, state.places.as_ref(), &state.discovery, &request).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(success_body(&request, outcome))).into_response()
        }
        Err(DiscoveryError::GeocodeFailed { .. }) => {
            error_body(StatusCode::BAD_REQUEST, "Could not geocode zip code")
        }
        Err(error) => {
            tracing::error!(client_id = %request.client_id, %error, "discovery run failed");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error during competitor discovery",
            )
        }
    }
}

fn success_body(request: &DiscoveryRequest, outcome: DiscoveryOutcome) -> DiscoverResponse {
    DiscoverResponse {
        success: true,
        search_metadata: SearchMetadata {
            postal_code: request.postal_code.clone(),
            coordinates: outcome.anchor,
            radius_miles: request.radius_miles,
            total_found: outcome.total_found,
            saved_count: outcome.saved_count,
        },
        competitors: outcome.competitors,
        market_analysis: outcome.summary,
    }
}
