//! Alpaca market-data client.
//!
//! Read-only access to the stocks snapshot endpoint: one batched request
//! returns latest trade, current daily bar and previous daily bar for every
//! requested ticker.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::pricing::{MarketDataSource, Snapshot};

const ALPACA_DATA_API: &str = "https://data.alpaca.markets/v2";

#[derive(Clone)]
pub struct AlpacaClient {
    client: Client,
    base_url: String,
    key_id: String,
    secret_key: String,
}

impl std::fmt::Debug for AlpacaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AlpacaClient {
    pub fn new(key_id: String, secret_key: String) -> Result<Self> {
        let base_url =
            env::var("ALPACA_DATA_URL").unwrap_or_else(|_| ALPACA_DATA_API.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client for Alpaca")?;

        Ok(Self {
            client,
            base_url,
            key_id,
            secret_key,
        })
    }

    /// Create a client from ALPACA_API_KEY / ALPACA_API_SECRET.
    pub fn from_env() -> Result<Self> {
        let key_id = env::var("ALPACA_API_KEY").context("ALPACA_API_KEY must be set")?;
        let secret_key = env::var("ALPACA_API_SECRET").context("ALPACA_API_SECRET must be set")?;
        Self::new(key_id, secret_key)
    }

    /// Fetch snapshots for all tickers in a single batched call.
    ///
    /// The response is keyed by symbol; the result is re-ordered to match
    /// the requested tickers, with `None` for symbols the provider did not
    /// return.
    async fn fetch_snapshots(&self, tickers: &[String]) -> Result<Vec<Option<Snapshot>>> {
        let url = format!("{}/stocks/snapshots", self.base_url);
        let symbols = tickers.join(",");
        debug!(symbols = %symbols, "fetching market snapshots");

        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols.as_str())])
            .header("APCA-API-KEY-ID", &self.key_id)
            .header("APCA-API-SECRET-KEY", &self.secret_key)
            .send()
            .await
            .context("snapshot request failed")?
            .error_for_status()
            .context("snapshot request rejected")?;

        let mut by_symbol: HashMap<String, Option<Snapshot>> = response
            .json()
            .await
            .context("malformed snapshot response")?;

        Ok(tickers
            .iter()
            .map(|ticker| {
                by_symbol.remove(ticker).flatten().map(|mut snapshot| {
                    snapshot.symbol = ticker.clone();
                    snapshot
                })
            })
            .collect())
    }
}

#[async_trait]
impl MarketDataSource for AlpacaClient {
    async fn snapshots(&self, tickers: &[String]) -> Result<Vec<Option<Snapshot>>> {
        self.fetch_snapshots(tickers).await
    }
}
