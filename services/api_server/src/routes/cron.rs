//! Externally scheduled price sync trigger.
//!
//! Authenticated by a shared secret, not user tokens; the external
//! scheduler is the only intended caller.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use fantera_core::pricing::sync::run_price_sync;
use tracing::error;

use crate::error::{api_success, ApiError};
use crate::routes::bearer_token;
use crate::state::SharedState;

pub async fn sync_prices(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if !cron_authorized(bearer_token(&headers), &state.config.cron_secret) {
        return Err(ApiError::unauthorized());
    }

    match run_price_sync(&state.alpaca, &state.db, &state.db).await {
        Ok(report) => Ok(api_success(report)),
        Err(err) => {
            error!(error = %err, "price sync failed");
            Err(ApiError::system("PRICE_FETCH_FAILED", "Failed to update prices"))
        }
    }
}

fn cron_authorized(token: Option<&str>, secret: &str) -> bool {
    !secret.is_empty() && token == Some(secret)
}
