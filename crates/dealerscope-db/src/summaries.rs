//! Database operations for the `market_analysis_summaries` table.
//!
//! Summaries are append-only: one row per discovery run, never updated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use dealerscope_core::domain::DensityTier;

use crate::DbError;

/// A row from the `market_analysis_summaries` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MarketSummaryRow {
    pub id: i64,
    pub public_id: Uuid,
    pub client_id: Uuid,
    pub search_zip: String,
    pub radius_miles: f64,
    pub total_found: i32,
    pub density_tier: String,
    pub average_rating: Option<f64>,
    pub data_quality_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Input record for one discovery run's summary.
#[derive(Debug, Clone)]
pub struct NewMarketSummary {
    pub client_id: Uuid,
    pub search_zip: String,
    pub radius_miles: f64,
    pub total_found: i32,
    pub density_tier: DensityTier,
    pub average_rating: Option<f64>,
    pub data_quality_score: f64,
}

const SUMMARY_COLUMNS: &str = "id, public_id, client_id, search_zip, radius_miles, \
     total_found, density_tier, average_rating, data_quality_score, created_at";

/// Append the summary row for a completed discovery run.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_market_summary(
    pool: &PgPool,
    summary: &NewMarketSummary,
) -> Result<MarketSummaryRow, DbError> {
    let sql = format!(
        "INSERT INTO market_analysis_summaries \
             (client_id, search_zip, radius_miles, total_found, density_tier, \
              average_rating, data_quality_score) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {SUMMARY_COLUMNS}"
    );

    let row = sqlx::query_as::<_, MarketSummaryRow>(&sql)
        .bind(summary.client_id)
        .bind(&summary.search_zip)
        .bind(summary.radius_miles)
        .bind(summary.total_found)
        .bind(summary.density_tier.as_str())
        .bind(summary.average_rating)
        .bind(summary.data_quality_score)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Most recent summaries for a client, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_market_summaries(
    pool: &PgPool,
    client_id: Uuid,
    limit: i64,
) -> Result<Vec<MarketSummaryRow>, DbError> {
    let sql = format!(
        "SELECT {SUMMARY_COLUMNS} \
         FROM market_analysis_summaries \
         WHERE client_id = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2"
    );

    let rows = sqlx::query_as::<_, MarketSummaryRow>(&sql)
        .bind(client_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
