//! Database operations for the `competitors` table.
//!
//! Discovery writes go through [`upsert_discovered_competitor`], keyed by the
//! natural key (`client_id`, `external_id`): rediscovery refreshes the
//! mutable attributes in place and never mints a new identity. Manually
//! entered competitors have no external id and are plain inserts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use dealerscope_core::domain::{BusinessClassification, DiscoverySource, Tier};

use crate::DbError;

/// A row from the `competitors` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CompetitorRow {
    pub id: i64,
    pub public_id: Uuid,
    pub client_id: Uuid,
    pub external_id: Option<String>,
    pub name: String,
    pub website: Option<String>,
    pub classification: String,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub photo_count: Option<i32>,
    pub distance_miles: Option<f64>,
    pub priority_tier: String,
    pub threat_tier: String,
    pub discovery_source: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input record for a competitor discovered via the external provider.
#[derive(Debug, Clone)]
pub struct NewDiscoveredCompetitor {
    pub external_id: String,
    pub name: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub photo_count: Option<i32>,
    pub distance_miles: Option<f64>,
    pub priority_tier: Tier,
    pub threat_tier: Tier,
    pub classification: BusinessClassification,
}

/// Input record for a manually entered competitor.
#[derive(Debug, Clone)]
pub struct NewManualCompetitor {
    pub name: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub classification: BusinessClassification,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct UpsertedRow {
    #[sqlx(flatten)]
    row: CompetitorRow,
    is_new: bool,
}

const COMPETITOR_COLUMNS: &str = "id, public_id, client_id, external_id, name, website, \
     classification, address_line1, city, state, zip, latitude, longitude, phone, \
     rating, review_count, photo_count, distance_miles, priority_tier, threat_tier, \
     discovery_source, is_active, created_at, updated_at";

/// Insert a discovered competitor or refresh the existing row with the same
/// (`client_id`, `external_id`) natural key.
///
/// On conflict only the mutable attributes change (rating, review count,
/// phone, website, distance, photo count, `updated_at`); identity, name,
/// address, and `created_at` are left untouched. A soft-deleted row that is
/// rediscovered is reactivated.
///
/// Returns the persisted row and `true` if it was newly inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_discovered_competitor(
    pool: &PgPool,
    client_id: Uuid,
    competitor: &NewDiscoveredCompetitor,
) -> Result<(CompetitorRow, bool), DbError> {
    let sql = format!(
        "INSERT INTO competitors \
             (client_id, external_id, name, website, classification, address_line1, \
              latitude, longitude, phone, rating, review_count, photo_count, \
              distance_miles, priority_tier, threat_tier, discovery_source) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         ON CONFLICT (client_id, external_id) WHERE external_id IS NOT NULL \
         DO UPDATE SET \
             rating         = EXCLUDED.rating, \
             review_count   = EXCLUDED.review_count, \
             phone          = EXCLUDED.phone, \
             website        = EXCLUDED.website, \
             distance_miles = EXCLUDED.distance_miles, \
             photo_count    = EXCLUDED.photo_count, \
             is_active      = TRUE, \
             updated_at     = NOW() \
         RETURNING {COMPETITOR_COLUMNS}, (xmax = 0) AS is_new"
    );

    let upserted = sqlx::query_as::<_, UpsertedRow>(&sql)
        .bind(client_id)
        .bind(&competitor.external_id)
        .bind(&competitor.name)
        .bind(&competitor.website)
        .bind(competitor.classification.as_str())
        .bind(&competitor.address_line1)
        .bind(competitor.latitude)
        .bind(competitor.longitude)
        .bind(&competitor.phone)
        .bind(competitor.rating)
        .bind(competitor.review_count)
        .bind(competitor.photo_count)
        .bind(competitor.distance_miles)
        .bind(competitor.priority_tier.as_str())
        .bind(competitor.threat_tier.as_str())
        .bind(DiscoverySource::ExternalApi.as_str())
        .fetch_one(pool)
        .await?;

    Ok((upserted.row, upserted.is_new))
}

/// Insert a manually entered competitor (no external id, no derived fields).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_manual_competitor(
    pool: &PgPool,
    client_id: Uuid,
    competitor: &NewManualCompetitor,
) -> Result<CompetitorRow, DbError> {
    let sql = format!(
        "INSERT INTO competitors \
             (client_id, name, website, phone, classification, \
              address_line1, city, state, zip, discovery_source) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {COMPETITOR_COLUMNS}"
    );

    let row = sqlx::query_as::<_, CompetitorRow>(&sql)
        .bind(client_id)
        .bind(&competitor.name)
        .bind(&competitor.website)
        .bind(&competitor.phone)
        .bind(competitor.classification.as_str())
        .bind(&competitor.address_line1)
        .bind(&competitor.city)
        .bind(&competitor.state)
        .bind(&competitor.zip)
        .bind(DiscoverySource::ManualEntry.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Active competitors for a client, nearest first (manual entries without a
/// distance sort last, then by name).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_competitors(
    pool: &PgPool,
    client_id: Uuid,
) -> Result<Vec<CompetitorRow>, DbError> {
    let sql = format!(
        "SELECT {COMPETITOR_COLUMNS} \
         FROM competitors \
         WHERE client_id = $1 AND is_active \
         ORDER BY distance_miles ASC NULLS LAST, name ASC"
    );

    let rows = sqlx::query_as::<_, CompetitorRow>(&sql)
        .bind(client_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Soft-delete a competitor by internal id.
///
/// The pipeline never hard-deletes; rows only ever flip `is_active`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no active row has the given id, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn deactivate_competitor(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE competitors \
         SET is_active = FALSE, updated_at = NOW() \
         WHERE id = $1 AND is_active",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
