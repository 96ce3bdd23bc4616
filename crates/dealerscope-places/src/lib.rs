//! Typed client for the external places provider.
//!
//! Covers the three lookups the discovery pipeline consumes: geocoding a
//! postal code, proximity ("nearby") search around a coordinate, and
//! per-place detail enrichment. Responses use the provider's JSON envelope
//! with a top-level `status` field; API-level failures surface as
//! [`PlacesError::ApiError`].

mod client;
mod error;
mod pacer;
mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use pacer::RequestPacer;
pub use types::{Coordinate, PlaceDetails, PlaceSummary};
