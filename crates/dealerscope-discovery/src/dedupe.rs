//! Dedup of merged proximity results.

use std::collections::HashSet;

use dealerscope_places::PlaceSummary;

/// Collapse merged raw results to one per external id, first occurrence wins.
///
/// Pure function, no I/O. Because the input is ordered by variant order then
/// provider order, "first wins" makes the surviving record deterministic
/// regardless of how the searches themselves were scheduled.
#[must_use]
pub fn dedupe_by_external_id(results: Vec<PlaceSummary>) -> Vec<PlaceSummary> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|r| seen.insert(r.external_id.clone()))
        .collect()
}
