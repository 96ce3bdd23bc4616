//! Public result types returned by [`crate::PlacesClient`].
//!
//! These are the shapes the rest of the system consumes; the provider's raw
//! envelope types stay private to the client module.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// One raw result row from a proximity search.
///
/// `external_id` is the provider's stable identifier for the place and is
/// the natural key for dedup and upsert. `vicinity` is the coarse address
/// string used as a fallback when detail enrichment fails.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub external_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub location: Coordinate,
    pub vicinity: Option<String>,
    pub photo_count: i64,
}

/// Extended attributes from a per-place detail lookup.
///
/// Every field is optional: the provider only returns what it knows, and
/// downstream stages must tolerate any subset being absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
}
