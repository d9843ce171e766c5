//! Club queries.
//!
//! Listing joins each active club with its single latest price row; clubs
//! without one default to price 0 / change 0.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ClubRef, ClubSummary};
use crate::pricing::sync::ClubDirectory;

/// Active clubs as (id, ticker) handles for the sync job.
pub async fn active_refs(pool: &PgPool) -> Result<Vec<ClubRef>> {
    let refs = sqlx::query_as::<_, ClubRef>(
        r#"
        SELECT id, ticker
        FROM clubs
        WHERE is_active
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(refs)
}

pub async fn list_active_with_latest_price(pool: &PgPool) -> Result<Vec<ClubSummary>> {
    let clubs = sqlx::query_as::<_, ClubSummary>(
        r#"
        SELECT c.id, c.name, c.ticker, c.exchange, c.crest_url, c.color_config,
               COALESCE(p.price, 0)::FLOAT8 AS price,
               COALESCE(p.change_pct, 0)::FLOAT8 AS change_pct
        FROM clubs c
        LEFT JOIN prices p ON p.club_id = c.id
        WHERE c.is_active
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(clubs)
}

/// One active club with its latest price, or `None` when the club is
/// missing or inactive.
pub async fn find_active_with_latest_price(
    pool: &PgPool,
    club_id: Uuid,
) -> Result<Option<ClubSummary>> {
    let club = sqlx::query_as::<_, ClubSummary>(
        r#"
        SELECT c.id, c.name, c.ticker, c.exchange, c.crest_url, c.color_config,
               COALESCE(p.price, 0)::FLOAT8 AS price,
               COALESCE(p.change_pct, 0)::FLOAT8 AS change_pct
        FROM clubs c
        LEFT JOIN prices p ON p.club_id = c.id
        WHERE c.id = $1 AND c.is_active
        "#,
    )
    .bind(club_id)
    .fetch_optional(pool)
    .await?;

    Ok(club)
}

#[async_trait]
impl ClubDirectory for PgPool {
    async fn active_clubs(&self) -> Result<Vec<ClubRef>> {
        active_refs(self).await
    }
}
