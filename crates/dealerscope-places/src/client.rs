//! HTTP client for the places provider REST API.
//!
//! Wraps `reqwest` with provider-specific error handling, API key management,
//! and typed response deserialization. Every endpoint checks the `"status"`
//! field in the JSON envelope; `OK` and `ZERO_RESULTS` are success, anything
//! else surfaces as [`PlacesError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlacesError;
use crate::types::{Coordinate, PlaceDetails, PlaceSummary};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

const DETAIL_FIELDS: &str =
    "formatted_address,formatted_phone_number,website,rating,user_ratings_total";

/// Client for the places provider REST API.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

// ---------------------------------------------------------------------------
// Provider envelope types (private; the wire shape stops here)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinate,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    geometry: Geometry,
    vicinity: Option<String>,
    #[serde(default)]
    photos: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: DetailsResult,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResult {
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
}

impl PlacesClient {
    /// Creates a new client pointed at the production provider API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dealerscope/0.1 (market-intelligence)")
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the base as a
        // directory rather than replacing its last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PlacesError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolves a postal code or free-text address to a coordinate pair.
    ///
    /// Returns `Ok(None)` when the provider reports `ZERO_RESULTS` or an
    /// empty result set — the caller decides whether that is fatal.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiError`] if the provider reports a failure status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlacesError> {
        let url = self.build_url("geocode/json", &[("address", address)])?;
        let body = self.request_json(&url).await?;
        if Self::is_zero_results(&body) {
            return Ok(None);
        }
        Self::check_api_error(&body)?;

        let parsed: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        Ok(parsed.results.into_iter().next().map(|r| r.geometry.location))
    }

    /// Runs one proximity search for `keyword` around `center`.
    ///
    /// Returns raw result rows in provider order. `ZERO_RESULTS` maps to an
    /// empty vector, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiError`] if the provider reports a failure status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn nearby_search(
        &self,
        center: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();
        let url = self.build_url(
            "place/nearbysearch/json",
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;
        let body = self.request_json(&url).await?;
        if Self::is_zero_results(&body) {
            return Ok(vec![]);
        }
        Self::check_api_error(&body)?;

        let parsed: NearbyResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearby_search(keyword={keyword})"),
                source: e,
            })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| PlaceSummary {
                external_id: r.place_id,
                name: r.name,
                rating: r.rating,
                review_count: r.user_ratings_total,
                location: r.geometry.location,
                vicinity: r.vicinity,
                photo_count: r.photos.len() as i64,
            })
            .collect())
    }

    /// Fetches extended attributes for one place by its external id.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiError`] if the provider reports a failure status
    ///   (including `NOT_FOUND` for an unknown id).
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn place_details(&self, external_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "place/details/json",
            &[("place_id", external_id), ("fields", DETAIL_FIELDS)],
        )?;
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let parsed: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("place_details(external_id={external_id})"),
                source: e,
            })?;

        Ok(PlaceDetails {
            address: parsed.result.formatted_address,
            phone: parsed.result.formatted_phone_number,
            website: parsed.result.website,
            rating: parsed.result.rating,
            review_count: parsed.result.user_ratings_total,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key to every request.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::ApiError(format!("invalid endpoint path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or a non-2xx status.
    /// Returns [`PlacesError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    fn is_zero_results(body: &serde_json::Value) -> bool {
        body.get("status").and_then(serde_json::Value::as_str) == Some("ZERO_RESULTS")
    }

    /// Checks the top-level `"status"` field and returns an error for
    /// anything other than `OK`.
    fn check_api_error(body: &serde_json::Value) -> Result<(), PlacesError> {
        let envelope: Envelope = serde_json::from_value(body.clone()).map_err(|e| {
            PlacesError::Deserialize {
                context: "status envelope".to_string(),
                source: e,
            }
        })?;
        if envelope.status != "OK" {
            let detail = envelope
                .error_message
                .unwrap_or_else(|| "no detail provided".to_string());
            return Err(PlacesError::ApiError(format!(
                "{}: {detail}",
                envelope.status
            )));
        }
        Ok(())
    }
}
