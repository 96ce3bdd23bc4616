//! Competitor discovery pipeline.
//!
//! One discovery run walks a fixed sequence of stages: geocode the anchor,
//! fan out proximity searches per keyword variant, dedupe by external id,
//! enrich with per-place detail lookups, classify by distance and rating,
//! upsert competitor rows, and append one market summary. Only a geocode
//! failure aborts the run; every later stage degrades to partial results
//! that are reported as counts rather than errors.

pub mod classify;
pub mod dedupe;
mod enrich;
mod error;
pub mod keywords;
mod pipeline;
mod search;
pub mod summarize;

pub use error::DiscoveryError;
pub use pipeline::{run_discovery, DiscoveryConfig, DiscoveryOutcome, DiscoveryRequest};
