//! The KYC verification flow.
//!
//! Per-user state machine: NOT_STARTED -> UNDER_REVIEW -> {ACTIVE |
//! REJECTED}, with UNDER_REVIEW polled against the provider. ACTIVE and
//! NOT_STARTED are stable for polling purposes and never trigger a provider
//! call. The controller is generic over the provider and store capabilities
//! so it can be exercised without network or database access.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::kyc::map_provider_status;
use crate::kyc::validation::KycSubmission;
use crate::models::{KycStatus, User};

/// Provider response to a verification initiation call.
#[derive(Debug, Clone, Deserialize)]
pub struct KycInitiation {
    pub status: Option<String>,
    pub provider_user_id: Option<String>,
}

/// Provider response to a status check.
#[derive(Debug, Clone)]
pub struct ProviderKycStatus {
    pub status: String,
    pub provider_user_id: Option<String>,
}

/// External identity-verification provider.
#[async_trait]
pub trait KycProvider: Send + Sync {
    async fn initiate_kyc(
        &self,
        subject_id: &str,
        submission: &KycSubmission,
    ) -> Result<KycInitiation>;

    async fn kyc_status(&self, subject_id: &str) -> Result<ProviderKycStatus>;
}

/// User lookup and KYC state persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_subject(&self, subject_id: &str) -> Result<Option<User>>;

    async fn update_kyc_state(
        &self,
        subject_id: &str,
        status: KycStatus,
        provider_user_id: Option<String>,
    ) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum KycError {
    #[error("user not found")]
    UserNotFound,
    #[error("user is already verified")]
    AlreadyVerified,
    #[error("invalid submission: {}", errors.join(", "))]
    InvalidSubmission { errors: Vec<String> },
    #[error("KYC provider call failed: {0}")]
    Provider(anyhow::Error),
    #[error("user store operation failed: {0}")]
    Store(anyhow::Error),
}

/// Orchestrates verification for one authenticated subject.
pub struct KycFlow<'a, P: ?Sized, S: ?Sized> {
    provider: &'a P,
    users: &'a S,
}

impl<'a, P, S> KycFlow<'a, P, S>
where
    P: KycProvider + ?Sized,
    S: UserStore + ?Sized,
{
    pub fn new(provider: &'a P, users: &'a S) -> Self {
        Self { provider, users }
    }

    /// Start verification.
    ///
    /// Rejects invalid submissions with the full error list, unknown users,
    /// and users that are already ACTIVE (the provider is never contacted
    /// in those cases). On success persists UNDER_REVIEW together with the
    /// provider's user id, which may be absent.
    pub async fn submit(
        &self,
        subject_id: &str,
        submission: &KycSubmission,
    ) -> Result<KycStatus, KycError> {
        if let Err(errors) = submission.validate() {
            return Err(KycError::InvalidSubmission { errors });
        }

        let user = self
            .users
            .find_by_subject(subject_id)
            .await
            .map_err(KycError::Store)?
            .ok_or(KycError::UserNotFound)?;

        if user.kyc_status == KycStatus::Active {
            return Err(KycError::AlreadyVerified);
        }

        let initiation = self
            .provider
            .initiate_kyc(subject_id, submission)
            .await
            .map_err(KycError::Provider)?;

        self.users
            .update_kyc_state(
                subject_id,
                KycStatus::UnderReview,
                initiation.provider_user_id,
            )
            .await
            .map_err(KycError::Store)?;

        info!(subject = subject_id, "KYC verification initiated");
        Ok(KycStatus::UnderReview)
    }

    /// Return the subject's current status, reconciling with the provider.
    ///
    /// ACTIVE and NOT_STARTED short-circuit without a provider call. For
    /// the remaining states the provider status is mapped locally and
    /// persisted only when it differs from the stored one; the provider
    /// user id falls back to the stored value when the check returns none.
    /// The freshly computed status is returned either way.
    pub async fn check_status(&self, subject_id: &str) -> Result<KycStatus, KycError> {
        let user = self
            .users
            .find_by_subject(subject_id)
            .await
            .map_err(KycError::Store)?
            .ok_or(KycError::UserNotFound)?;

        if matches!(user.kyc_status, KycStatus::Active | KycStatus::NotStarted) {
            return Ok(user.kyc_status);
        }

        let provider_status = self
            .provider
            .kyc_status(subject_id)
            .await
            .map_err(KycError::Provider)?;
        let mapped = map_provider_status(&provider_status.status);

        if mapped != user.kyc_status {
            let provider_user_id = provider_status
                .provider_user_id
                .or(user.kyc_provider_user_id);
            self.users
                .update_kyc_state(subject_id, mapped, provider_user_id)
                .await
                .map_err(KycError::Store)?;
        }

        Ok(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    struct FakeProvider {
        initiation: KycInitiation,
        status: ProviderKycStatus,
        initiate_calls: AtomicUsize,
        status_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(status: &str, provider_user_id: Option<&str>) -> Self {
            Self {
                initiation: KycInitiation {
                    status: Some("under_review".to_string()),
                    provider_user_id: Some("bridge-123".to_string()),
                },
                status: ProviderKycStatus {
                    status: status.to_string(),
                    provider_user_id: provider_user_id.map(str::to_string),
                },
                initiate_calls: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl KycProvider for FakeProvider {
        async fn initiate_kyc(
            &self,
            _subject_id: &str,
            _submission: &KycSubmission,
        ) -> Result<KycInitiation> {
            self.initiate_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.initiation.clone())
        }

        async fn kyc_status(&self, _subject_id: &str) -> Result<ProviderKycStatus> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status.clone())
        }
    }

    struct FakeUsers {
        user: Option<User>,
        updates: Mutex<Vec<(KycStatus, Option<String>)>>,
    }

    impl FakeUsers {
        fn with_status(status: KycStatus, provider_user_id: Option<&str>) -> Self {
            Self {
                user: Some(User {
                    id: Uuid::new_v4(),
                    privy_id: "did:privy:abc123".to_string(),
                    email: Some("john@example.com".to_string()),
                    display_name: None,
                    wallet_address: None,
                    kyc_status: status,
                    kyc_provider_user_id: provider_user_id.map(str::to_string),
                }),
                updates: Mutex::new(Vec::new()),
            }
        }

        fn missing() -> Self {
            Self {
                user: None,
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserStore for FakeUsers {
        async fn find_by_subject(&self, _subject_id: &str) -> Result<Option<User>> {
            Ok(self.user.clone())
        }

        async fn update_kyc_state(
            &self,
            _subject_id: &str,
            status: KycStatus,
            provider_user_id: Option<String>,
        ) -> Result<()> {
            self.updates.lock().unwrap().push((status, provider_user_id));
            Ok(())
        }
    }

    fn valid_submission() -> KycSubmission {
        KycSubmission {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            date_of_birth: "1990-01-15".to_string(),
            street_address: "123 Main St".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            postal_code: "10001".to_string(),
            country: "USA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_persists_under_review_with_provider_id() {
        let provider = FakeProvider::new("not_started", None);
        let users = FakeUsers::with_status(KycStatus::NotStarted, None);
        let flow = KycFlow::new(&provider, &users);

        let status = flow
            .submit("did:privy:abc123", &valid_submission())
            .await
            .unwrap();

        assert_eq!(status, KycStatus::UnderReview);
        let updates = users.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            &[(KycStatus::UnderReview, Some("bridge-123".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_already_verified_without_provider_call() {
        let provider = FakeProvider::new("active", None);
        let users = FakeUsers::with_status(KycStatus::Active, None);
        let flow = KycFlow::new(&provider, &users);

        let err = flow
            .submit("did:privy:abc123", &valid_submission())
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::AlreadyVerified));
        assert_eq!(provider.initiate_calls.load(Ordering::SeqCst), 0);
        assert!(users.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_enumerates_validation_errors_before_anything_else() {
        let provider = FakeProvider::new("active", None);
        let users = FakeUsers::missing();
        let flow = KycFlow::new(&provider, &users);

        let submission = KycSubmission {
            first_name: String::new(),
            country: "US".to_string(),
            ..valid_submission()
        };
        let err = flow.submit("did:privy:abc123", &submission).await.unwrap_err();

        match err {
            KycError::InvalidSubmission { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.initiate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_unknown_user() {
        let provider = FakeProvider::new("active", None);
        let users = FakeUsers::missing();
        let flow = KycFlow::new(&provider, &users);

        let err = flow
            .submit("did:privy:abc123", &valid_submission())
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::UserNotFound));
    }

    #[tokio::test]
    async fn test_check_short_circuits_stable_states() {
        for stable in [KycStatus::Active, KycStatus::NotStarted] {
            let provider = FakeProvider::new("rejected", None);
            let users = FakeUsers::with_status(stable, None);
            let flow = KycFlow::new(&provider, &users);

            let status = flow.check_status("did:privy:abc123").await.unwrap();

            assert_eq!(status, stable);
            assert_eq!(provider.status_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_check_persists_transition_to_active() {
        let provider = FakeProvider::new("active", Some("bridge-123"));
        let users = FakeUsers::with_status(KycStatus::UnderReview, None);
        let flow = KycFlow::new(&provider, &users);

        let status = flow.check_status("did:privy:abc123").await.unwrap();

        assert_eq!(status, KycStatus::Active);
        let updates = users.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            &[(KycStatus::Active, Some("bridge-123".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_check_unchanged_status_writes_nothing() {
        let provider = FakeProvider::new("under_review", Some("bridge-123"));
        let users = FakeUsers::with_status(KycStatus::UnderReview, Some("bridge-123"));
        let flow = KycFlow::new(&provider, &users);

        let status = flow.check_status("did:privy:abc123").await.unwrap();

        assert_eq!(status, KycStatus::UnderReview);
        assert_eq!(provider.status_calls.load(Ordering::SeqCst), 1);
        assert!(users.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_keeps_stored_provider_id_when_check_returns_none() {
        let provider = FakeProvider::new("rejected", None);
        let users = FakeUsers::with_status(KycStatus::UnderReview, Some("bridge-old"));
        let flow = KycFlow::new(&provider, &users);

        let status = flow.check_status("did:privy:abc123").await.unwrap();

        assert_eq!(status, KycStatus::Rejected);
        let updates = users.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            &[(KycStatus::Rejected, Some("bridge-old".to_string()))]
        );
    }
}
