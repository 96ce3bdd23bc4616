//! Aggregate market statistics for a discovery run.

use dealerscope_core::domain::DensityTier;

/// Quality of provider-sourced data is treated as a fixed constant until a
/// real scoring model exists.
pub const DATA_QUALITY_SCORE: f64 = 0.85;

/// Aggregates over one run's unique result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketStats {
    pub density: DensityTier,
    /// Mean over ratings that were present; `None` when no result carried a
    /// rating (including the zero-result run).
    pub average_rating: Option<f64>,
}

/// Compute the density tier and average rating for a run.
///
/// `total_found` is the pre-truncation unique count, so a large market reads
/// as dense even when the detail-lookup cap trimmed what was persisted.
#[must_use]
pub fn summarize_market(total_found: usize, ratings: &[f64]) -> MarketStats {
    let density = if total_found > 20 {
        DensityTier::High
    } else if total_found > 10 {
        DensityTier::Medium
    } else {
        DensityTier::Low
    };

    let average_rating = if ratings.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    MarketStats {
        density,
        average_rating,
    }
}
