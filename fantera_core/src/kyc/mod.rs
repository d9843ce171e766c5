//! KYC verification: provider status mapping, submission validation, and
//! the verification flow controller.

pub mod flow;
pub mod validation;

use tracing::warn;

use crate::models::KycStatus;

/// Map an identity provider's verification status string onto the local
/// status enum.
///
/// Total over arbitrary input: unrecognized provider states degrade to
/// `NotStarted` (logged at warn so new provider states surface in
/// operations rather than silently).
pub fn map_provider_status(provider_status: &str) -> KycStatus {
    match provider_status {
        "not_found" | "not_started" | "incomplete" => KycStatus::NotStarted,
        "under_review" | "awaiting_questionnaire" | "awaiting_ubo" | "paused" => {
            KycStatus::UnderReview
        }
        "active" => KycStatus::Active,
        "rejected" | "offboarded" => KycStatus::Rejected,
        other => {
            warn!(status = other, "unrecognized provider KYC status");
            KycStatus::NotStarted
        }
    }
}
