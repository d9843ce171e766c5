//! Identity-provider webhook handling.
//!
//! Events are delivered with svix-style signature headers (message id,
//! unix-epoch timestamp, one or more `v1,<base64>` signatures). The signed
//! content is `{id}.{timestamp}.{payload}` under HMAC-SHA256 with the
//! base64-decoded signing secret. `user.created` events carry the subject
//! id and linked accounts from which the local user record is derived.

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed skew between the webhook timestamp and now.
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

const SECRET_PREFIX: &str = "whsec_";

// ============================================================================
// Signature verification
// ============================================================================

/// The three signature headers attached to every delivery.
#[derive(Debug, Clone)]
pub struct SignatureHeaders<'a> {
    pub message_id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

/// Verify a delivery's signature and timestamp.
///
/// The signature header may carry several space-separated candidates (key
/// rotation); verification succeeds when any `v1` candidate matches.
pub fn verify_signature(
    signing_secret: &str,
    headers: &SignatureHeaders<'_>,
    payload: &[u8],
    now: DateTime<Utc>,
) -> Result<()> {
    let timestamp: i64 = headers
        .timestamp
        .parse()
        .context("webhook timestamp is not a unix epoch")?;
    if (now.timestamp() - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err(anyhow!("webhook timestamp outside tolerance"));
    }

    let secret = signing_secret
        .strip_prefix(SECRET_PREFIX)
        .unwrap_or(signing_secret);
    let key = BASE64
        .decode(secret)
        .context("webhook signing secret is not base64")?;

    let mut mac =
        HmacSha256::new_from_slice(&key).context("invalid webhook signing key length")?;
    mac.update(headers.message_id.as_bytes());
    mac.update(b".");
    mac.update(headers.timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    for candidate in headers.signature.split(' ') {
        let Some(encoded) = candidate.strip_prefix("v1,") else {
            continue;
        };
        let Ok(bytes) = BASE64.decode(encoded) else {
            continue;
        };
        if mac.clone().verify_slice(&bytes).is_ok() {
            return Ok(());
        }
    }

    Err(anyhow!("no matching webhook signature"))
}

// ============================================================================
// Event payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub user: Option<WebhookUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookUser {
    pub id: String,
    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedAccount {
    #[serde(rename = "type")]
    pub account_type: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub name: Option<String>,
}

/// Contact fields extracted from a `user.created` event's linked accounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
}

/// Derive the user profile from linked accounts.
///
/// Email resolves from the email account's address, then the google email,
/// then the apple email. Display name resolves from the google name, then
/// the apple name. Wallet address comes from the wallet account. Absent
/// sources yield `None`, and upserts overwrite with null rather than
/// keeping stale values.
pub fn extract_profile(accounts: &[LinkedAccount]) -> IdentityProfile {
    let find = |kind: &str| accounts.iter().find(|a| a.account_type == kind);

    let email_account = find("email");
    let google = find("google_oauth");
    let apple = find("apple_oauth");
    let wallet = find("wallet");

    IdentityProfile {
        email: email_account
            .and_then(|a| a.address.clone())
            .or_else(|| google.and_then(|a| a.email.clone()))
            .or_else(|| apple.and_then(|a| a.email.clone())),
        display_name: google
            .and_then(|a| a.name.clone())
            .or_else(|| apple.and_then(|a| a.name.clone())),
        wallet_address: wallet.and_then(|a| a.address.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(kind: &str, email: Option<&str>, address: Option<&str>, name: Option<&str>) -> LinkedAccount {
        LinkedAccount {
            account_type: kind.to_string(),
            email: email.map(str::to_string),
            address: address.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    fn sign(secret_key: &[u8], id: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret_key).unwrap();
        mac.update(format!("{id}.{timestamp}.").as_bytes());
        mac.update(payload);
        format!("v1,{}", BASE64.encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_verifies_valid_signature() {
        let key = b"0123456789abcdef0123456789abcdef";
        let secret = format!("whsec_{}", BASE64.encode(key));
        let now = Utc::now();
        let timestamp = now.timestamp().to_string();
        let payload = br#"{"type":"user.created"}"#;

        let signature = sign(key, "msg_1", &timestamp, payload);
        let headers = SignatureHeaders {
            message_id: "msg_1",
            timestamp: &timestamp,
            signature: &signature,
        };

        assert!(verify_signature(&secret, &headers, payload, now).is_ok());
    }

    #[test]
    fn test_accepts_any_matching_candidate() {
        let key = b"0123456789abcdef0123456789abcdef";
        let secret = BASE64.encode(key);
        let now = Utc::now();
        let timestamp = now.timestamp().to_string();
        let payload = b"{}";

        let good = sign(key, "msg_1", &timestamp, payload);
        let combined = format!("v1,AAAA v2,ignored {good}");
        let headers = SignatureHeaders {
            message_id: "msg_1",
            timestamp: &timestamp,
            signature: &combined,
        };

        assert!(verify_signature(&secret, &headers, payload, now).is_ok());
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let key = b"0123456789abcdef0123456789abcdef";
        let secret = BASE64.encode(key);
        let now = Utc::now();
        let timestamp = now.timestamp().to_string();

        let signature = sign(key, "msg_1", &timestamp, b"{}");
        let headers = SignatureHeaders {
            message_id: "msg_1",
            timestamp: &timestamp,
            signature: &signature,
        };

        assert!(verify_signature(&secret, &headers, b"{tampered}", now).is_err());
    }

    #[test]
    fn test_rejects_stale_timestamp() {
        let key = b"0123456789abcdef0123456789abcdef";
        let secret = BASE64.encode(key);
        let now = Utc::now();
        let stale = (now.timestamp() - 600).to_string();
        let payload = b"{}";

        let signature = sign(key, "msg_1", &stale, payload);
        let headers = SignatureHeaders {
            message_id: "msg_1",
            timestamp: &stale,
            signature: &signature,
        };

        assert!(verify_signature(&secret, &headers, payload, now).is_err());
    }

    #[test]
    fn test_email_priority_order() {
        let profile = extract_profile(&[
            account("apple_oauth", Some("apple@example.com"), None, Some("Apple Name")),
            account("google_oauth", Some("google@example.com"), None, Some("Google Name")),
            account("email", None, Some("direct@example.com"), None),
        ]);

        assert_eq!(profile.email.as_deref(), Some("direct@example.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Google Name"));
    }

    #[test]
    fn test_email_falls_back_to_oauth_accounts() {
        let profile = extract_profile(&[account(
            "apple_oauth",
            Some("apple@example.com"),
            None,
            Some("Apple Name"),
        )]);

        assert_eq!(profile.email.as_deref(), Some("apple@example.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Apple Name"));
        assert_eq!(profile.wallet_address, None);
    }

    #[test]
    fn test_wallet_address_extraction() {
        let profile = extract_profile(&[account("wallet", None, Some("0xabc123"), None)]);

        assert_eq!(profile.wallet_address.as_deref(), Some("0xabc123"));
        assert_eq!(profile.email, None);
        assert_eq!(profile.display_name, None);
    }

    #[test]
    fn test_no_accounts_yields_all_none() {
        assert_eq!(extract_profile(&[]), IdentityProfile::default());
    }

    #[test]
    fn test_event_deserialization() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "type": "user.created",
                "user": {
                    "id": "did:privy:abc123",
                    "linked_accounts": [
                        { "type": "email", "address": "john@example.com" }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.event_type, "user.created");
        let user = event.user.unwrap();
        assert_eq!(user.id, "did:privy:abc123");
        assert_eq!(user.linked_accounts.len(), 1);
    }
}
