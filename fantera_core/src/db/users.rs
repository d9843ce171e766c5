//! User persistence.
//!
//! Users are keyed by the identity provider's subject id. Webhook-driven
//! upserts are idempotent and overwrite mutable profile fields with the
//! freshly extracted values, including nulls.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::kyc::flow::UserStore;
use crate::models::{KycStatus, User};
use crate::webhook::IdentityProfile;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    privy_id: String,
    email: Option<String>,
    display_name: Option<String>,
    wallet_address: Option<String>,
    kyc_status: String,
    kyc_provider_user_id: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            privy_id: row.privy_id,
            email: row.email,
            display_name: row.display_name,
            wallet_address: row.wallet_address,
            kyc_status: KycStatus::parse(&row.kyc_status).unwrap_or(KycStatus::NotStarted),
            kyc_provider_user_id: row.kyc_provider_user_id,
        }
    }
}

pub async fn find_by_privy_id(pool: &PgPool, privy_id: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, privy_id, email, display_name, wallet_address,
               kyc_status::TEXT AS kyc_status, kyc_provider_user_id
        FROM users
        WHERE privy_id = $1
        "#,
    )
    .bind(privy_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Create or refresh a user from an identity-provider event.
pub async fn upsert_identity(
    pool: &PgPool,
    privy_id: &str,
    profile: &IdentityProfile,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (privy_id, email, display_name, wallet_address)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (privy_id) DO UPDATE SET
            email = EXCLUDED.email,
            display_name = EXCLUDED.display_name,
            wallet_address = EXCLUDED.wallet_address,
            updated_at = NOW()
        "#,
    )
    .bind(privy_id)
    .bind(&profile.email)
    .bind(&profile.display_name)
    .bind(&profile.wallet_address)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn set_kyc_state(
    pool: &PgPool,
    privy_id: &str,
    status: KycStatus,
    provider_user_id: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET kyc_status = $2::kyc_status,
            kyc_provider_user_id = $3,
            updated_at = NOW()
        WHERE privy_id = $1
        "#,
    )
    .bind(privy_id)
    .bind(status.as_str())
    .bind(provider_user_id)
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl UserStore for PgPool {
    async fn find_by_subject(&self, subject_id: &str) -> Result<Option<User>> {
        find_by_privy_id(self, subject_id).await
    }

    async fn update_kyc_state(
        &self,
        subject_id: &str,
        status: KycStatus,
        provider_user_id: Option<String>,
    ) -> Result<()> {
        set_kyc_state(self, subject_id, status, provider_user_id.as_deref()).await
    }
}
