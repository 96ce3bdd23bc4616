//! Ordered brand/category tags owned by a competitor.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

/// Which tag table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Brand,
    Category,
}

impl TagKind {
    /// Table name, fixed at compile time so it can be spliced into SQL.
    fn table(self) -> &'static str {
        match self {
            TagKind::Brand => "competitor_brands",
            TagKind::Category => "competitor_categories",
        }
    }
}

/// A row from `competitor_brands` or `competitor_categories`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TagRow {
    pub id: i64,
    pub competitor_id: i64,
    pub name: String,
    pub position: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Replace a competitor's tags of one kind with the given ordered names.
///
/// The first name in the batch becomes the primary tag. An empty slice
/// clears all tags of that kind. Runs in a transaction so readers never see
/// a half-replaced set.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete or insert fails.
pub async fn replace_competitor_tags(
    pool: &PgPool,
    competitor_id: i64,
    kind: TagKind,
    names: &[String],
) -> Result<(), DbError> {
    let table = kind.table();
    let mut tx = pool.begin().await?;

    sqlx::query(&format!("DELETE FROM {table} WHERE competitor_id = $1"))
        .bind(competitor_id)
        .execute(&mut *tx)
        .await?;

    if !names.is_empty() {
        sqlx::query(&format!(
            "INSERT INTO {table} (competitor_id, name, position, is_primary) \
             SELECT $1, t.name, t.ord::int - 1, t.ord = 1 \
             FROM UNNEST($2::text[]) WITH ORDINALITY AS t(name, ord)"
        ))
        .bind(competitor_id)
        .bind(names)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Tags of one kind for a competitor, in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_competitor_tags(
    pool: &PgPool,
    competitor_id: i64,
    kind: TagKind,
) -> Result<Vec<TagRow>, DbError> {
    let table = kind.table();
    let rows = sqlx::query_as::<_, TagRow>(&format!(
        "SELECT id, competitor_id, name, position, is_primary, created_at \
         FROM {table} \
         WHERE competitor_id = $1 \
         ORDER BY position ASC"
    ))
    .bind(competitor_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
