use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One issued email verification challenge (a row of `email_verification_codes`).
#[derive(Debug, Clone)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
}

/// Lifecycle state of a record at a given instant. `Expired` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Pending,
    Verified,
    Expired,
}

impl VerificationRecord {
    pub fn state(&self, now: DateTime<Utc>) -> VerificationState {
        if self.verified {
            VerificationState::Verified
        } else if now < self.expires_at {
            VerificationState::Pending
        } else {
            VerificationState::Expired
        }
    }

    /// Whether `code` redeems this record for `email` at `now`.
    pub fn redeemable_by(&self, email: &str, code: &str, now: DateTime<Utc>) -> bool {
        self.state(now) == VerificationState::Pending && self.email == email && self.code == code
    }
}

/// Rendered email handed to the delivery collaborator.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Account details submitted alongside a code to finish sign-up.
#[derive(Clone)]
pub struct AccountDetails {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub phone_number: String,
    pub password: String,
}

impl fmt::Debug for AccountDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDetails")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("city", &self.city)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Metadata stored on the identity-provider account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityMetadata {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub phone_number: String,
}

/// Request to create an identity-provider account.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    /// Mark the address confirmed; it was just verified out-of-band.
    pub email_confirmed: bool,
    pub metadata: IdentityMetadata,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("email_confirmed", &self.email_confirmed)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Application profile keyed by the identity-provider user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub phone_number: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One place-search suggestion. Fields other than `description` and
/// `place_id` are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Verification code length in digits.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Verification code time-to-live in seconds.
pub const VERIFICATION_CODE_TTL_SECS: i64 = 600;

/// Shortest autocomplete input forwarded to the place-search provider.
pub const MIN_AUTOCOMPLETE_INPUT_CHARS: usize = 2;
