//! Idempotent database seeding.
//!
//! Upserts the club catalog (branding, exchange, crest) and one ACTIVE test
//! user, keyed on ticker and subject id respectively, so repeated runs are
//! safe.

use anyhow::{Context, Result};
use dotenv::dotenv;
use fantera_core::catalog::CLUB_BRANDING;
use fantera_core::db;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool).await?;

    info!("seeding clubs");
    for club in CLUB_BRANDING {
        let color_config = json!({
            "primary": club.primary,
            "secondary": club.secondary,
            "gradientStart": club.gradient_start,
            "gradientEnd": club.gradient_end,
            "glowColor": club.glow_color,
        });

        sqlx::query(
            r#"
            INSERT INTO clubs (name, ticker, exchange, crest_url, color_config)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (ticker) DO UPDATE SET
                name = EXCLUDED.name,
                exchange = EXCLUDED.exchange,
                crest_url = EXCLUDED.crest_url,
                color_config = EXCLUDED.color_config
            "#,
        )
        .bind(club.name)
        .bind(club.ticker)
        .bind(club.exchange)
        .bind(club.crest_url)
        .bind(&color_config)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to seed club {}", club.ticker))?;
    }

    sqlx::query(
        r#"
        INSERT INTO users (privy_id, email, display_name, kyc_status)
        VALUES ($1, $2, $3, 'ACTIVE'::kyc_status)
        ON CONFLICT (privy_id) DO UPDATE SET
            kyc_status = 'ACTIVE'::kyc_status,
            updated_at = NOW()
        "#,
    )
    .bind("test-privy-user-001")
    .bind("testuser@example.com")
    .bind("Test User")
    .execute(&pool)
    .await
    .context("Failed to seed test user")?;

    info!(clubs = CLUB_BRANDING.len(), "seed complete");
    Ok(())
}
