//! Privy identity and KYC client.
//!
//! Covers bearer-token verification for inbound requests and the fiat KYC
//! endpoints (initiate, status check). Server-to-server calls authenticate
//! with Basic credentials plus the app-id header.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::kyc::flow::{KycInitiation, KycProvider, ProviderKycStatus};
use crate::kyc::validation::KycSubmission;

const PRIVY_API_BASE: &str = "https://auth.privy.io/api/v1";
const DEFAULT_KYC_PROVIDER: &str = "bridge-sandbox";

#[derive(Clone)]
pub struct PrivyClient {
    client: Client,
    base_url: String,
    app_id: String,
    app_secret: String,
    kyc_provider: String,
}

impl std::fmt::Debug for PrivyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivyClient")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Caller identity resolved from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject_id: String,
}

#[derive(Debug, Deserialize)]
struct SubjectResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct KycStatusResponse {
    status: String,
    provider_user_id: Option<String>,
}

impl PrivyClient {
    pub fn new(app_id: String, app_secret: String) -> Result<Self> {
        let base_url = env::var("PRIVY_API_URL").unwrap_or_else(|_| PRIVY_API_BASE.to_string());
        let kyc_provider =
            env::var("PRIVY_KYC_PROVIDER").unwrap_or_else(|_| DEFAULT_KYC_PROVIDER.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client for Privy")?;

        Ok(Self {
            client,
            base_url,
            app_id,
            app_secret,
            kyc_provider,
        })
    }

    /// Create a client from PRIVY_APP_ID / PRIVY_APP_SECRET.
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("PRIVY_APP_ID").context("PRIVY_APP_ID must be set")?;
        let app_secret = env::var("PRIVY_APP_SECRET").context("PRIVY_APP_SECRET must be set")?;
        Self::new(app_id, app_secret)
    }

    /// Resolve a bearer access token to the caller's subject id.
    ///
    /// Any failure (transport, status, malformed body) yields `None`;
    /// callers treat that uniformly as unauthenticated.
    pub async fn verify_auth_token(&self, token: &str) -> Option<AuthenticatedUser> {
        let url = format!("{}/users/me", self.base_url);
        let result = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("privy-app-id", &self.app_id)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<SubjectResponse>().await {
                    Ok(subject) => Some(AuthenticatedUser {
                        subject_id: subject.id,
                    }),
                    Err(err) => {
                        debug!(error = %err, "token verification returned malformed body");
                        None
                    }
                }
            }
            Ok(response) => {
                debug!(status = %response.status(), "access token rejected");
                None
            }
            Err(err) => {
                debug!(error = %err, "token verification request failed");
                None
            }
        }
    }

    async fn initiate(&self, subject_id: &str, submission: &KycSubmission) -> Result<KycInitiation> {
        let url = format!("{}/users/{}/fiat/kyc", self.base_url, subject_id);
        let body = json!({
            "provider": self.kyc_provider,
            "data": {
                "type": "individual",
                "first_name": submission.first_name,
                "last_name": submission.last_name,
                "email": submission.email,
                "residential_address": {
                    "street_line_1": submission.street_address,
                    "city": submission.city,
                    "subdivision": submission.state,
                    "postal_code": submission.postal_code,
                    "country": submission.country,
                },
                "birth_date": submission.date_of_birth,
            },
        });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.app_id, Some(&self.app_secret))
            .header("privy-app-id", &self.app_id)
            .json(&body)
            .send()
            .await
            .context("KYC initiation request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("KYC initiation failed: {}", response.status()));
        }

        response
            .json::<KycInitiation>()
            .await
            .context("malformed KYC initiation response")
    }

    async fn status(&self, subject_id: &str) -> Result<ProviderKycStatus> {
        let url = format!("{}/users/{}/fiat/kyc", self.base_url, subject_id);
        let response = self
            .client
            .get(&url)
            .query(&[("provider", self.kyc_provider.as_str())])
            .basic_auth(&self.app_id, Some(&self.app_secret))
            .header("privy-app-id", &self.app_id)
            .send()
            .await
            .context("KYC status request failed")?;

        // The provider answers 404 for users it has never seen; that is a
        // regular "not started" outcome, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ProviderKycStatus {
                status: "not_found".to_string(),
                provider_user_id: None,
            });
        }
        if !response.status().is_success() {
            return Err(anyhow!("KYC status check failed: {}", response.status()));
        }

        let body: KycStatusResponse = response
            .json()
            .await
            .context("malformed KYC status response")?;
        Ok(ProviderKycStatus {
            status: body.status,
            provider_user_id: body.provider_user_id,
        })
    }
}

#[async_trait]
impl KycProvider for PrivyClient {
    async fn initiate_kyc(
        &self,
        subject_id: &str,
        submission: &KycSubmission,
    ) -> Result<KycInitiation> {
        self.initiate(subject_id, submission).await
    }

    async fn kyc_status(&self, subject_id: &str) -> Result<ProviderKycStatus> {
        self.status(subject_id).await
    }
}
