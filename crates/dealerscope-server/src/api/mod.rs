mod competitors;
mod discover;
mod summaries;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use dealerscope_discovery::DiscoveryConfig;
use dealerscope_places::PlacesClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub places: Arc<PlacesClient>,
    pub discovery: DiscoveryConfig,
    pub default_radius_miles: f64,
}

#[derive(Debug, Serialize)]
struct ErrorMessage {
    error: &'static str,
}

/// Flat `{"error": "..."}` body, the wire contract for every failure path.
fn error_body(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorMessage { error: message })).into_response()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 200)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/discover", post(discover::discover))
        .route(
            "/clients/{client_id}/competitors",
            get(competitors::list_client_competitors),
        )
        .route(
            "/clients/{client_id}/market-summaries",
            get(summaries::list_client_summaries),
        )
        .route("/competitors/{id}", delete(competitors::remove_competitor))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match dealerscope_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::discover::SearchMetadata;
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use dealerscope_core::domain::DensityTier;
    use dealerscope_db::{insert_market_summary, NewMarketSummary};
    use dealerscope_places::Coordinate;

    fn test_app(pool: PgPool, base_url: &str) -> Router {
        let places =
            PlacesClient::with_base_url("test-key", 5, base_url).expect("places client");
        build_app(AppState {
            pool,
            places: Arc::new(places),
            discovery: DiscoveryConfig::unthrottled(),
            default_radius_miles: 25.0,
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[test]
    fn normalize_limit_applies_defaults_and_bounds() {
        assert_eq!(normalize_limit(None), 50);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(1_000)), 200);
        assert_eq!(normalize_limit(Some(25)), 25);
    }

    #[test]
    fn search_metadata_serializes_camel_case() {
        let metadata = SearchMetadata {
            postal_code: "76309".to_string(),
            coordinates: Coordinate {
                lat: 33.9137,
                lng: -98.4934,
            },
            radius_miles: 25.0,
            total_found: 29,
            saved_count: 29,
        };
        let json = serde_json::to_value(&metadata).expect("serialize");
        assert_eq!(json["postalCode"].as_str(), Some("76309"));
        assert_eq!(json["totalFound"].as_i64(), Some(29));
        assert_eq!(json["savedCount"].as_i64(), Some(29));
        assert!(json["coordinates"]["lat"].is_f64());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_returns_ok(pool: PgPool) {
        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"].as_str(), Some("ok"));
        assert_eq!(json["database"].as_str(), Some("ok"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn discover_without_required_fields_is_rejected(pool: PgPool) {
        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(post_json("/discover", serde_json::json!({})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Missing required fields"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn discover_blank_postal_code_is_rejected(pool: PgPool) {
        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(post_json(
                "/discover",
                serde_json::json!({
                    "postalCode": "   ",
                    "clientId": Uuid::new_v4(),
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Missing required fields"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn discover_geocode_failure_returns_400(pool: PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }),
            ))
            .mount(&server)
            .await;

        let app = test_app(pool, &server.uri());
        let response = app
            .oneshot(post_json(
                "/discover",
                serde_json::json!({
                    "postalCode": "00000",
                    "clientId": Uuid::new_v4(),
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Could not geocode zip code"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn discover_happy_path_returns_metadata_and_rows(pool: PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [
                    { "geometry": { "location": { "lat": 33.9137, "lng": -98.4934 } } }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "place_id": "h1",
                        "name": "Hotel Autos",
                        "rating": 4.3,
                        "user_ratings_total": 88,
                        "geometry": { "location": { "lat": 33.90, "lng": -98.49 } },
                        "vicinity": "1500 Kemp Blvd"
                    },
                    {
                        "place_id": "h2",
                        "name": "India Imports",
                        "geometry": { "location": { "lat": 33.95, "lng": -98.50 } },
                        "vicinity": "2200 Maplewood Ave"
                    }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/place/details/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "status": "OK", "result": {} }),
            ))
            .mount(&server)
            .await;

        let client_id = Uuid::new_v4();
        let app = test_app(pool, &server.uri());
        let response = app
            .oneshot(post_json(
                "/discover",
                serde_json::json!({
                    "postalCode": "76309",
                    "clientId": client_id,
                    "businessTypes": ["car dealership"],
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"].as_bool(), Some(true));
        assert_eq!(json["searchMetadata"]["postalCode"].as_str(), Some("76309"));
        assert_eq!(json["searchMetadata"]["totalFound"].as_i64(), Some(2));
        assert_eq!(json["searchMetadata"]["savedCount"].as_i64(), Some(2));
        assert!(
            (json["searchMetadata"]["radiusMiles"].as_f64().unwrap() - 25.0).abs() < 1e-9,
            "radius defaults when the body omits it"
        );
        assert_eq!(json["competitors"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["marketAnalysis"]["density_tier"].as_str(), Some("low"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_competitors_returns_empty_array_for_unknown_client(pool: PgPool) {
        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/clients/{}/competitors", Uuid::new_v4()))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn delete_unknown_competitor_returns_404(pool: PgPool) {
        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/competitors/999999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Competitor not found"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn market_summaries_honor_limit_and_order(pool: PgPool) {
        let client_id = Uuid::new_v4();
        for zip in ["76301", "76302", "76309"] {
            insert_market_summary(
                &pool,
                &NewMarketSummary {
                    client_id,
                    search_zip: zip.to_string(),
                    radius_miles: 25.0,
                    total_found: 5,
                    density_tier: DensityTier::Low,
                    average_rating: None,
                    data_quality_score: 0.85,
                },
            )
            .await
            .expect("seed summary");
        }

        let app = test_app(pool, "http://127.0.0.1:1/");
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/clients/{client_id}/market-summaries?limit=2"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let rows = json.as_array().expect("array");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["search_zip"].as_str(), Some("76309"), "newest first");
    }
}
