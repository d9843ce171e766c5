use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from the environment.
///
/// Provider credentials (Privy, Alpaca) are read by the respective clients;
/// this struct carries what the HTTP layer itself needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Shared secret authenticating the external price-sync trigger.
    pub cron_secret: String,
    /// Signing secret for identity-provider webhook deliveries.
    pub webhook_signing_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let cron_secret = env::var("CRON_SECRET").context("CRON_SECRET must be set")?;
        let webhook_signing_key = env::var("PRIVY_WEBHOOK_SIGNING_KEY")
            .context("PRIVY_WEBHOOK_SIGNING_KEY must be set")?;

        Ok(Self {
            host,
            port,
            database_url,
            cron_secret,
            webhook_signing_key,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "postgres://localhost/fantera".to_string(),
            cron_secret: "secret".to_string(),
            webhook_signing_key: "whsec_abc".to_string(),
        };
        assert_eq!(config.address(), "127.0.0.1:3000");
    }
}
