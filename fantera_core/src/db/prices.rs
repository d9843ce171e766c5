//! Latest-price persistence.
//!
//! `prices` holds exactly one mutable "current price" row per club,
//! enforced by the unique constraint on club_id; the upsert keys on it so
//! concurrent sync runs resolve to last-write-wins.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::LatestPrice;
use crate::pricing::sync::PriceWriter;

pub async fn upsert_latest(
    pool: &PgPool,
    club_id: Uuid,
    price: f64,
    change_pct: f64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO prices (club_id, price, change_pct, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (club_id) DO UPDATE SET
            price = EXCLUDED.price,
            change_pct = EXCLUDED.change_pct,
            updated_at = NOW()
        "#,
    )
    .bind(club_id)
    .bind(price)
    .bind(change_pct)
    .execute(pool)
    .await?;

    Ok(())
}

/// All price rows joined with their club's ticker, newest first.
pub async fn list_latest(pool: &PgPool) -> Result<Vec<LatestPrice>> {
    let prices = sqlx::query_as::<_, LatestPrice>(
        r#"
        SELECT p.club_id, c.ticker, p.price, p.change_pct, p.updated_at
        FROM prices p
        JOIN clubs c ON c.id = p.club_id
        ORDER BY p.updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(prices)
}

/// Keep only the newest row per club.
///
/// The schema already guarantees uniqueness; this is a safety net on the
/// read path so a duplicate can never reach clients.
pub fn dedupe_latest(prices: Vec<LatestPrice>) -> Vec<LatestPrice> {
    let mut seen = HashSet::new();
    prices
        .into_iter()
        .filter(|price| seen.insert(price.club_id))
        .collect()
}

#[async_trait]
impl PriceWriter for PgPool {
    async fn upsert_latest_price(&self, club_id: Uuid, price: f64, change_pct: f64) -> Result<()> {
        upsert_latest(self, club_id, price, change_pct).await
    }
}
