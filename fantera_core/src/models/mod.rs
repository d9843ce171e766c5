// Shared models for Fantera services
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// KYC Status
// ============================================================================

/// Local verification status for a user.
///
/// `Pending` exists in the persisted enum but is only reachable through
/// administrative tooling; the verification flow moves users between the
/// other four states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    NotStarted,
    Pending,
    UnderReview,
    Active,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::NotStarted => "NOT_STARTED",
            KycStatus::Pending => "PENDING",
            KycStatus::UnderReview => "UNDER_REVIEW",
            KycStatus::Active => "ACTIVE",
            KycStatus::Rejected => "REJECTED",
        }
    }

    /// Parse a persisted status value. Returns `None` for anything outside
    /// the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NOT_STARTED" => Some(KycStatus::NotStarted),
            "PENDING" => Some(KycStatus::Pending),
            "UNDER_REVIEW" => Some(KycStatus::UnderReview),
            "ACTIVE" => Some(KycStatus::Active),
            "REJECTED" => Some(KycStatus::Rejected),
            _ => None,
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// A platform user, keyed by the identity provider's subject id.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub privy_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
    pub kyc_status: KycStatus,
    pub kyc_provider_user_id: Option<String>,
}

// ============================================================================
// Clubs & Prices
// ============================================================================

/// Minimal club handle used by the price sync job.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClubRef {
    pub id: Uuid,
    pub ticker: String,
}

/// A club joined with its latest known price. Clubs without a price row
/// carry `price = 0` and `change_pct = 0`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub ticker: String,
    pub exchange: String,
    pub crest_url: String,
    pub color_config: Option<serde_json::Value>,
    pub price: f64,
    pub change_pct: f64,
}

/// Sort clubs by current price, highest first.
pub fn sort_by_price_desc(clubs: &mut [ClubSummary]) {
    clubs.sort_by(|a, b| b.price.total_cmp(&a.price));
}

/// Latest price row joined with its club's ticker, as served by the prices
/// endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LatestPrice {
    pub club_id: Uuid,
    pub ticker: String,
    pub price: f64,
    pub change_pct: f64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// Club branding palette
// ============================================================================

const DEFAULT_PRIMARY: &str = "#1a1a2e";
const DEFAULT_SECONDARY: &str = "#ffffff";
const DEFAULT_GRADIENT_END: &str = "#000000";

/// Resolved five-color branding palette for a club detail view.
///
/// Built from the club's stored `color_config` with per-field fallbacks:
/// gradient start and glow fall back to the stored primary before the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPalette {
    pub primary: String,
    pub secondary: String,
    pub gradient_start: String,
    pub gradient_end: String,
    pub glow_color: String,
}

impl ClubPalette {
    pub fn from_config(raw: Option<&serde_json::Value>) -> Self {
        let field = |key: &str| -> Option<String> {
            raw.and_then(|v| v.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        let primary = field("primary");
        Self {
            gradient_start: field("gradientStart")
                .or_else(|| primary.clone())
                .unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            glow_color: field("glowColor")
                .or_else(|| primary.clone())
                .unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            primary: primary.unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            secondary: field("secondary").unwrap_or_else(|| DEFAULT_SECONDARY.to_string()),
            gradient_end: field("gradientEnd").unwrap_or_else(|| DEFAULT_GRADIENT_END.to_string()),
        }
    }
}
