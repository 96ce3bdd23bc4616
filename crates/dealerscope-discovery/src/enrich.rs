//! Per-place detail enrichment.

use dealerscope_places::{PlaceDetails, PlaceSummary, PlacesClient, RequestPacer};

/// A unique search result paired with whatever detail lookup produced.
#[derive(Debug, Clone)]
pub(crate) struct EnrichedPlace {
    pub summary: PlaceSummary,
    /// `None` when the detail call failed; downstream falls back to the
    /// search-stage vicinity string and rating.
    pub detail: Option<PlaceDetails>,
}

/// Fetch details for up to `max_lookups` unique results.
///
/// Results beyond the cap are dropped from the run entirely (the market
/// summary still counts them via the pre-truncation total). A per-item
/// failure keeps the item in the run with `detail = None`.
pub(crate) async fn enrich_all(
    client: &PlacesClient,
    pacer: &mut RequestPacer,
    uniques: Vec<PlaceSummary>,
    max_lookups: usize,
) -> Vec<EnrichedPlace> {
    let total = uniques.len();
    if total > max_lookups {
        tracing::info!(
            total,
            max_lookups,
            "truncating result set before detail enrichment"
        );
    }

    let mut enriched = Vec::with_capacity(total.min(max_lookups));
    for summary in uniques.into_iter().take(max_lookups) {
        pacer.pause().await;
        let detail = match client.place_details(&summary.external_id).await {
            Ok(detail) => Some(detail),
            Err(error) => {
                tracing::warn!(
                    external_id = %summary.external_id,
                    %error,
                    "detail lookup failed, continuing with search-stage data"
                );
                None
            }
        };
        enriched.push(EnrichedPlace { summary, detail });
    }
    enriched
}
