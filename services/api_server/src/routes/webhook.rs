//! Identity-provider webhook intake.
//!
//! Deliveries are signature-verified before any parsing. Only
//! `user.created` events mutate state; everything else is acknowledged and
//! ignored, and redeliveries are safe because the upsert is idempotent.

use anyhow::{anyhow, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use fantera_core::db::users;
use fantera_core::webhook::{extract_profile, verify_signature, SignatureHeaders, WebhookEvent};
use serde_json::json;
use tracing::{info, warn};

use crate::state::{AppState, SharedState};

pub async fn receive(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    match handle(&state, &headers, &body).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "received": true }))),
        Err(err) => {
            warn!(error = %err, "webhook rejected");
            (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid webhook" })))
        }
    }
}

async fn handle(state: &AppState, headers: &HeaderMap, body: &str) -> Result<()> {
    let signature_headers = SignatureHeaders {
        message_id: header_str(headers, "svix-id"),
        timestamp: header_str(headers, "svix-timestamp"),
        signature: header_str(headers, "svix-signature"),
    };
    verify_signature(
        &state.config.webhook_signing_key,
        &signature_headers,
        body.as_bytes(),
        Utc::now(),
    )?;

    let event: WebhookEvent = serde_json::from_str(body)?;
    if event.event_type == "user.created" {
        let user = event
            .user
            .ok_or_else(|| anyhow!("user.created event without a user payload"))?;
        let profile = extract_profile(&user.linked_accounts);
        users::upsert_identity(&state.db, &user.id, &profile).await?;
        info!(subject = %user.id, "user record upserted from webhook");
    }

    Ok(())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
