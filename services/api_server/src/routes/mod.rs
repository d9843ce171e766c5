pub mod clubs;
pub mod cron;
pub mod kyc;
pub mod prices;
pub mod webhook;

use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use axum::Router;
use fantera_core::clients::privy::AuthenticatedUser;

use crate::error::ApiError;
use crate::state::{AppState, SharedState};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/kyc", post(kyc::submit).get(kyc::status))
        .route("/api/auth/webhook", post(webhook::receive))
        .route("/api/clubs", get(clubs::list))
        .route("/api/clubs/:club_id", get(clubs::detail))
        .route("/api/prices", get(prices::list))
        .route("/api/cron/prices", get(cron::sync_prices))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Resolve the caller from the bearer token, rejecting anything that does
/// not verify against the identity provider.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, ApiError> {
    let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
    state
        .privy
        .verify_auth_token(token)
        .await
        .ok_or_else(ApiError::unauthorized)
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
