//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use dealerscope_places::{Coordinate, PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn geocode_returns_first_result_coordinate() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Wichita Falls, TX 76309, USA",
                "geometry": { "location": { "lat": 33.9137, "lng": -98.4934 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "76309"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coordinate = client
        .geocode("76309")
        .await
        .expect("should parse geocode response")
        .expect("should find a coordinate");

    assert!((coordinate.lat - 33.9137).abs() < 1e-6);
    assert!((coordinate.lng - (-98.4934)).abs() < 1e-6);
}

#[tokio::test]
async fn geocode_zero_results_maps_to_none() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coordinate = client.geocode("00000").await.expect("should not error");
    assert!(coordinate.is_none());
}

#[tokio::test]
async fn nearby_search_returns_summaries_in_provider_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "place-a",
                "name": "Alpha Auto Sales",
                "rating": 4.2,
                "user_ratings_total": 187,
                "geometry": { "location": { "lat": 33.85, "lng": -98.5 } },
                "vicinity": "1200 Scott Ave, Wichita Falls",
                "photos": [{}, {}, {}]
            },
            {
                "place_id": "place-b",
                "name": "Bravo Motors",
                "geometry": { "location": { "lat": 33.9, "lng": -98.45 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("keyword", "car dealer"))
        .and(query_param("radius", "40234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .nearby_search(
            Coordinate {
                lat: 33.9137,
                lng: -98.4934,
            },
            40_234,
            "car dealer",
        )
        .await
        .expect("should parse nearby results");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].external_id, "place-a");
    assert_eq!(results[0].name, "Alpha Auto Sales");
    assert_eq!(results[0].rating, Some(4.2));
    assert_eq!(results[0].review_count, Some(187));
    assert_eq!(results[0].photo_count, 3);
    assert_eq!(
        results[0].vicinity.as_deref(),
        Some("1200 Scott Ave, Wichita Falls")
    );
    // Optional fields absent on the second row.
    assert_eq!(results[1].external_id, "place-b");
    assert_eq!(results[1].rating, None);
    assert_eq!(results[1].photo_count, 0);
    assert!(results[1].vicinity.is_none());
}

#[tokio::test]
async fn nearby_search_zero_results_is_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .nearby_search(
            Coordinate {
                lat: 0.0,
                lng: 0.0,
            },
            1000,
            "car dealer",
        )
        .await
        .expect("zero results should not error");
    assert!(results.is_empty());
}

#[tokio::test]
async fn place_details_returns_extended_attributes() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "result": {
            "formatted_address": "1200 Scott Ave, Wichita Falls, TX 76301",
            "formatted_phone_number": "(940) 555-0134",
            "website": "https://alphaauto.example.com",
            "rating": 4.3,
            "user_ratings_total": 190
        }
    });

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "place-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client
        .place_details("place-a")
        .await
        .expect("should parse details");

    assert_eq!(
        details.address.as_deref(),
        Some("1200 Scott Ave, Wichita Falls, TX 76301")
    );
    assert_eq!(details.phone.as_deref(), Some("(940) 555-0134"));
    assert_eq!(details.website.as_deref(), Some("https://alphaauto.example.com"));
    assert_eq!(details.rating, Some(4.3));
    assert_eq!(details.review_count, Some(190));
}

#[tokio::test]
async fn api_failure_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_details("place-a").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiError(ref m) if m.contains("OVER_QUERY_LIMIT")),
        "got: {err}"
    );
}

#[tokio::test]
async fn http_500_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("76309").await.unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)), "got: {err}");
}
