#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{EmailMessage, NewIdentity, Prediction, Profile, VerificationRecord};
use crate::error::VerificationServiceError;

/// Store of issued verification codes.
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new record. Never touches existing records for the same email.
    async fn insert(&self, record: &VerificationRecord) -> Result<(), VerificationServiceError>;

    /// Newest record (by `created_at`) for `email` + `code` that is unverified
    /// and unexpired at `now`.
    async fn find_latest_redeemable(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationRecord>, VerificationServiceError>;

    /// Flip `verified` to true for exactly this record, only if it is still
    /// unverified. Returns `false` when another caller consumed it first.
    async fn mark_verified(&self, id: Uuid) -> Result<bool, VerificationServiceError>;
}

/// Outbound email delivery.
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), VerificationServiceError>;
}

/// Identity-provider admin API.
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return its user id.
    async fn create_user(&self, identity: &NewIdentity) -> Result<Uuid, VerificationServiceError>;
}

/// Repository for application profiles, keyed by identity user id.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Profile>, VerificationServiceError>;

    async fn create(&self, profile: &Profile) -> Result<(), VerificationServiceError>;

    async fn update(&self, profile: &Profile) -> Result<(), VerificationServiceError>;
}

/// Place-search provider used for city autocomplete.
pub trait PlaceSearch: Send + Sync {
    async fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>, VerificationServiceError>;
}
