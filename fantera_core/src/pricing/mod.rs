//! Market snapshot normalization and price staleness rules.
//!
//! A snapshot is the market-data provider's combined payload for one ticker:
//! latest trade, current daily bar and previous daily bar. Normalization
//! turns a batch of snapshots into clean per-ticker quotes, skipping tickers
//! with no usable price data.

pub mod sync;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Default staleness threshold for displayed prices (2 minutes).
pub const STALE_THRESHOLD_MS: i64 = 120_000;

#[derive(Debug, Clone, Deserialize)]
pub struct LatestTrade {
    #[serde(rename = "p")]
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "c")]
    pub close: f64,
}

/// Raw per-ticker snapshot as returned by the market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "latestTrade")]
    pub latest_trade: Option<LatestTrade>,
    #[serde(rename = "dailyBar")]
    pub daily_bar: Option<DailyBar>,
    #[serde(rename = "prevDailyBar")]
    pub prev_daily_bar: Option<DailyBar>,
}

/// Clean per-ticker quote produced by normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub ticker: String,
    pub price: f64,
    pub change_pct: f64,
}

/// Capability to fetch snapshots for a set of tickers in one batched call.
///
/// The result preserves ticker order; tickers the provider knows nothing
/// about yield `None`.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn snapshots(&self, tickers: &[String]) -> Result<Vec<Option<Snapshot>>>;
}

/// Normalize a batch of snapshots into quotes.
///
/// Current price resolves from the daily bar close, then the latest trade;
/// a ticker whose price resolves to zero is skipped (logged, not an error).
/// Change percentage is day-over-day against the previous close, zero when
/// no previous close exists. Missing snapshot entries are skipped silently
/// and the output preserves input order.
pub fn normalize_snapshots(snapshots: &[Option<Snapshot>]) -> Vec<PriceQuote> {
    let mut quotes = Vec::with_capacity(snapshots.len());

    for snapshot in snapshots.iter().flatten() {
        let current = snapshot
            .daily_bar
            .as_ref()
            .map(|bar| bar.close)
            .or_else(|| snapshot.latest_trade.as_ref().map(|trade| trade.price))
            .unwrap_or(0.0);

        if current == 0.0 {
            warn!(ticker = %snapshot.symbol, "skipping ticker: no valid price data");
            continue;
        }

        let prev_close = snapshot
            .prev_daily_bar
            .as_ref()
            .map(|bar| bar.close)
            .unwrap_or(0.0);

        let change_pct = if prev_close > 0.0 {
            ((current - prev_close) / prev_close) * 100.0
        } else {
            0.0
        };

        quotes.push(PriceQuote {
            ticker: snapshot.symbol.clone(),
            price: current,
            change_pct: round_half_up_2(change_pct),
        });
    }

    quotes
}

/// Fetch and normalize latest quotes for the given tickers.
///
/// An empty ticker list returns an empty result without touching the
/// upstream provider.
pub async fn latest_quotes<M>(source: &M, tickers: &[String]) -> Result<Vec<PriceQuote>>
where
    M: MarketDataSource + ?Sized,
{
    if tickers.is_empty() {
        return Ok(Vec::new());
    }

    let snapshots = source.snapshots(tickers).await?;
    Ok(normalize_snapshots(&snapshots))
}

/// Round half-up at the hundredths digit.
pub fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Whether a price timestamp is too old to display as current.
pub fn is_price_stale(updated_at: DateTime<Utc>, now: DateTime<Utc>, threshold_ms: i64) -> bool {
    (now - updated_at).num_milliseconds() > threshold_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn snapshot(
        symbol: &str,
        latest_trade: Option<f64>,
        daily_close: Option<f64>,
        prev_close: Option<f64>,
    ) -> Snapshot {
        Snapshot {
            symbol: symbol.to_string(),
            latest_trade: latest_trade.map(|price| LatestTrade { price }),
            daily_bar: daily_close.map(|close| DailyBar { close }),
            prev_daily_bar: prev_close.map(|close| DailyBar { close }),
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarketDataSource for CountingSource {
        async fn snapshots(&self, tickers: &[String]) -> Result<Vec<Option<Snapshot>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(tickers.iter().map(|_| None).collect())
        }
    }

    #[test]
    fn test_prefers_daily_close_over_latest_trade() {
        let quotes = normalize_snapshots(&[Some(snapshot(
            "MANU",
            Some(16.5),
            Some(16.2),
            Some(16.0),
        ))]);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].ticker, "MANU");
        assert_eq!(quotes[0].price, 16.2);
        // ((16.2 - 16.0) / 16.0) * 100 = 1.25
        assert_eq!(quotes[0].change_pct, 1.25);
    }

    #[test]
    fn test_change_pct_rounds_to_two_decimals() {
        let quotes = normalize_snapshots(&[Some(snapshot(
            "JUVE.MI",
            Some(0.35),
            Some(0.32),
            Some(0.30),
        ))]);

        // ((0.32 - 0.30) / 0.30) * 100 = 6.666... -> 6.67
        assert_eq!(quotes[0].change_pct, 6.67);
    }

    #[test]
    fn test_falls_back_to_latest_trade() {
        let quotes = normalize_snapshots(&[Some(snapshot("TEST", Some(25.0), None, Some(24.0)))]);

        assert_eq!(quotes[0].price, 25.0);
        // ((25.0 - 24.0) / 24.0) * 100 = 4.1666... -> 4.17
        assert_eq!(quotes[0].change_pct, 4.17);
    }

    #[test]
    fn test_skips_missing_entries_preserving_order() {
        let quotes = normalize_snapshots(&[
            Some(snapshot("A", None, Some(10.0), Some(8.0))),
            None,
            None,
            Some(snapshot("B", None, Some(5.0), Some(4.0))),
        ]);

        let tickers: Vec<&str> = quotes.iter().map(|q| q.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "B"]);
    }

    #[test]
    fn test_zero_prev_close_means_zero_change() {
        let quotes = normalize_snapshots(&[Some(snapshot("ZERO", Some(10.0), Some(10.0), Some(0.0)))]);

        assert_eq!(quotes[0].change_pct, 0.0);
    }

    #[test]
    fn test_missing_prev_bar_means_zero_change() {
        let quotes = normalize_snapshots(&[Some(snapshot("NEW", None, Some(10.0), None))]);

        assert_eq!(quotes[0].change_pct, 0.0);
    }

    #[test]
    fn test_skips_ticker_with_no_usable_price() {
        let quotes = normalize_snapshots(&[
            Some(snapshot("DEAD", None, None, Some(4.0))),
            Some(snapshot("ZEROBAR", None, Some(0.0), Some(4.0))),
            Some(snapshot("LIVE", Some(2.0), None, None)),
        ]);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].ticker, "LIVE");
    }

    #[tokio::test]
    async fn test_empty_tickers_never_hit_the_source() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
        };

        let quotes = latest_quotes(&source, &[]).await.unwrap();

        assert!(quotes.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_is_price_stale() {
        let now = Utc::now();

        let fresh = now - Duration::milliseconds(30_000);
        let stale = now - Duration::milliseconds(150_000);

        assert!(!is_price_stale(fresh, now, STALE_THRESHOLD_MS));
        assert!(is_price_stale(stale, now, STALE_THRESHOLD_MS));
    }
}
