//! Scheduled price synchronization.
//!
//! One run loads the active club tickers, fetches a single batched snapshot
//! from the market-data provider, normalizes it, and upserts the latest
//! price row for every club with a usable quote. Upserts are issued
//! concurrently and awaited together; a failed upstream fetch or upsert
//! fails the whole run.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::ClubRef;
use crate::pricing::{latest_quotes, MarketDataSource};

/// Capability to enumerate clubs eligible for price updates.
#[async_trait]
pub trait ClubDirectory: Send + Sync {
    async fn active_clubs(&self) -> Result<Vec<ClubRef>>;
}

/// Capability to write the single latest price row for a club.
#[async_trait]
pub trait PriceWriter: Send + Sync {
    async fn upsert_latest_price(&self, club_id: Uuid, price: f64, change_pct: f64) -> Result<()>;
}

/// Result of one sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub updated: usize,
    pub timestamp: DateTime<Utc>,
}

/// Run one price sync pass.
///
/// Quotes for tickers that no longer match an active club are dropped.
/// With no active clubs the provider is never contacted and the report
/// carries zero updates.
pub async fn run_price_sync<M, C, W>(market: &M, clubs: &C, prices: &W) -> Result<SyncReport>
where
    M: MarketDataSource + ?Sized,
    C: ClubDirectory + ?Sized,
    W: PriceWriter + ?Sized,
{
    let active = clubs.active_clubs().await?;
    if active.is_empty() {
        info!("price sync: no active clubs");
        return Ok(SyncReport {
            updated: 0,
            timestamp: Utc::now(),
        });
    }

    let tickers: Vec<String> = active.iter().map(|club| club.ticker.clone()).collect();
    let quotes = latest_quotes(market, &tickers).await?;

    let club_by_ticker: HashMap<&str, Uuid> = active
        .iter()
        .map(|club| (club.ticker.as_str(), club.id))
        .collect();

    let upserts: Vec<_> = quotes
        .iter()
        .filter_map(|quote| {
            club_by_ticker
                .get(quote.ticker.as_str())
                .map(|club_id| prices.upsert_latest_price(*club_id, quote.price, quote.change_pct))
        })
        .collect();

    let updated = upserts.len();
    try_join_all(upserts).await?;

    info!(updated, "price sync complete");
    Ok(SyncReport {
        updated,
        timestamp: Utc::now(),
    })
}
