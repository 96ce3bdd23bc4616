//! The discovery run orchestrator.

use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use dealerscope_core::domain::BusinessClassification;
use dealerscope_db::{
    insert_market_summary, upsert_discovered_competitor, CompetitorRow, MarketSummaryRow,
    NewDiscoveredCompetitor, NewMarketSummary,
};
use dealerscope_places::{Coordinate, PlacesClient, RequestPacer};

use crate::classify::classify;
use crate::dedupe::dedupe_by_external_id;
use crate::enrich::{enrich_all, EnrichedPlace};
use crate::error::DiscoveryError;
use crate::keywords::resolve_keywords;
use crate::search::search_all_variants;
use crate::summarize::{summarize_market, DATA_QUALITY_SCORE};

/// Tuning knobs for the pipeline's I/O stages.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryConfig {
    /// Minimum gap between successive proximity searches.
    pub search_delay_ms: u64,
    /// Minimum gap between successive detail lookups.
    pub detail_delay_ms: u64,
    /// Cap on detail lookups per run; uniques beyond this are dropped.
    pub max_detail_lookups: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_delay_ms: 100,
            detail_delay_ms: 200,
            max_detail_lookups: 50,
        }
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn from_app_config(config: &dealerscope_core::AppConfig) -> Self {
        Self {
            search_delay_ms: config.search_delay_ms,
            detail_delay_ms: config.detail_delay_ms,
            max_detail_lookups: config.max_detail_lookups,
        }
    }

    /// Zero-delay variant for tests.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self {
            search_delay_ms: 0,
            detail_delay_ms: 0,
            ..Self::default()
        }
    }
}

/// One validated discovery request.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    pub client_id: Uuid,
    pub postal_code: String,
    pub radius_miles: f64,
    /// Optional keyword override; `None` uses the default dealer vocabulary.
    pub business_types: Option<Vec<String>>,
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// Rows actually persisted, in pipeline order.
    pub competitors: Vec<CompetitorRow>,
    pub summary: MarketSummaryRow,
    /// The resolved anchor coordinate.
    pub anchor: Coordinate,
    /// Unique results found, before the detail-lookup cap.
    pub total_found: usize,
    /// Records that made it into the store.
    pub saved_count: usize,
}

/// Execute one full discovery run.
///
/// Stages run sequentially: Geocoding → Searching → Deduplicating →
/// Enriching → Persisting → Summarizing. A geocode failure aborts; every
/// later per-call or per-record failure degrades the run to partial results
/// reported via `total_found` vs `saved_count`.
///
/// # Errors
///
/// - [`DiscoveryError::GeocodeFailed`] if the postal code cannot be
///   resolved (provider failure or empty result set).
/// - [`DiscoveryError::Db`] if the summary row cannot be appended.
pub async fn run_discovery(
    pool: &PgPool,
    places: &PlacesClient,
    config: &DiscoveryConfig,
    request: &DiscoveryRequest,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    let anchor = geocode_anchor(places, &request.postal_code).await?;
    tracing::info!(
        postal_code = %request.postal_code,
        lat = anchor.lat,
        lng = anchor.lng,
        radius_miles = request.radius_miles,
        "anchor resolved, starting proximity search"
    );

    let keywords = resolve_keywords(request.business_types.as_deref());
    let mut search_pacer = RequestPacer::new(Duration::from_millis(config.search_delay_ms));
    let raw = search_all_variants(
        places,
        &mut search_pacer,
        anchor,
        request.radius_miles,
        &keywords,
    )
    .await;

    let unique = dedupe_by_external_id(raw);
    let total_found = unique.len();
    // Summary aggregates are taken from the full unique set, before the
    // detail cap trims what gets persisted.
    let ratings: Vec<f64> = unique.iter().filter_map(|p| p.rating).collect();

    let mut detail_pacer = RequestPacer::new(Duration::from_millis(config.detail_delay_ms));
    let enriched = enrich_all(places, &mut detail_pacer, unique, config.max_detail_lookups).await;

    let mut competitors = Vec::with_capacity(enriched.len());
    for place in &enriched {
        let record = build_competitor(anchor, place);
        match upsert_discovered_competitor(pool, request.client_id, &record).await {
            Ok((row, _is_new)) => competitors.push(row),
            Err(error) => {
                tracing::warn!(
                    external_id = %record.external_id,
                    %error,
                    "failed to persist competitor, continuing run"
                );
            }
        }
    }
    let saved_count = competitors.len();

    let stats = summarize_market(total_found, &ratings);
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let summary = insert_market_summary(
        pool,
        &NewMarketSummary {
            client_id: request.client_id,
            search_zip: request.postal_code.clone(),
            radius_miles: request.radius_miles,
            total_found: total_found as i32,
            density_tier: stats.density,
            average_rating: stats.average_rating,
            data_quality_score: DATA_QUALITY_SCORE,
        },
    )
    .await?;

    tracing::info!(
        total_found,
        saved_count,
        density = summary.density_tier,
        "discovery run complete"
    );

    Ok(DiscoveryOutcome {
        competitors,
        summary,
        anchor,
        total_found,
        saved_count,
    })
}

/// Resolve the anchor or abort the run.
async fn geocode_anchor(
    places: &PlacesClient,
    postal_code: &str,
) -> Result<Coordinate, DiscoveryError> {
    match places.geocode(postal_code).await {
        Ok(Some(coordinate)) => Ok(coordinate),
        Ok(None) => Err(DiscoveryError::GeocodeFailed {
            postal_code: postal_code.to_string(),
        }),
        Err(error) => {
            tracing::warn!(postal_code, %error, "geocode provider call failed");
            Err(DiscoveryError::GeocodeFailed {
                postal_code: postal_code.to_string(),
            })
        }
    }
}

/// Merge search and detail data into one persistable record.
///
/// Detail fields win where present; a missing detail record falls back to
/// the coarse search-stage values (vicinity as the address, search rating).
fn build_competitor(anchor: Coordinate, place: &EnrichedPlace) -> NewDiscoveredCompetitor {
    let summary = &place.summary;
    let detail = place.detail.as_ref();

    let rating = detail.and_then(|d| d.rating).or(summary.rating);
    let review_count = detail
        .and_then(|d| d.review_count)
        .or(summary.review_count)
        .and_then(|n| i32::try_from(n).ok());
    let address_line1 = detail
        .and_then(|d| d.address.clone())
        .or_else(|| summary.vicinity.clone());

    let classification = classify(anchor, summary.location, rating);

    NewDiscoveredCompetitor {
        external_id: summary.external_id.clone(),
        name: summary.name.clone(),
        website: detail.and_then(|d| d.website.clone()),
        phone: detail.and_then(|d| d.phone.clone()),
        address_line1,
        latitude: Some(summary.location.lat),
        longitude: Some(summary.location.lng),
        rating,
        review_count,
        photo_count: i32::try_from(summary.photo_count).ok(),
        distance_miles: Some(classification.distance_miles),
        priority_tier: classification.priority,
        threat_tier: classification.threat,
        classification: BusinessClassification::Local,
    }
}
