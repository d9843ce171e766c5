use std::sync::Arc;

use fantera_core::clients::{AlpacaClient, PrivyClient};
use sqlx::PgPool;

use crate::config::Config;

/// Shared handles for request handlers.
pub struct AppState {
    pub db: PgPool,
    pub privy: PrivyClient,
    pub alpaca: AlpacaClient,
    pub config: Config,
}

pub type SharedState = Arc<AppState>;
