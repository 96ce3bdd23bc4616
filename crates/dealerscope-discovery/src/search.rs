//! Proximity search fan-out across keyword variants.

use dealerscope_places::{Coordinate, PlaceSummary, PlacesClient, RequestPacer};

const METERS_PER_MILE: f64 = 1609.34;

/// Run one proximity search per keyword variant and merge the raw results.
///
/// Merge order is variant order then provider order, which fixes the
/// "first occurrence wins" semantics of the later dedupe stage. The pacer
/// spaces provider calls; a failed variant is logged and contributes zero
/// results rather than aborting the run.
pub(crate) async fn search_all_variants(
    client: &PlacesClient,
    pacer: &mut RequestPacer,
    center: Coordinate,
    radius_miles: f64,
    keywords: &[String],
) -> Vec<PlaceSummary> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius_meters = (radius_miles * METERS_PER_MILE).round().max(1.0) as u32;

    let mut merged = Vec::new();
    for keyword in keywords {
        pacer.pause().await;
        match client.nearby_search(center, radius_meters, keyword).await {
            Ok(results) => {
                tracing::debug!(keyword, count = results.len(), "search variant complete");
                merged.extend(results);
            }
            Err(error) => {
                tracing::warn!(keyword, %error, "search variant failed, continuing run");
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_converts_miles_to_meters() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meters = (25.0_f64 * METERS_PER_MILE).round() as u32;
        assert_eq!(meters, 40_234);
    }
}
