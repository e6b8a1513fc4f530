use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{IdentityProvider, ProfileRepository, VerificationCodeRepository};
use crate::domain::types::{
    AccountDetails, IdentityMetadata, NewIdentity, Profile, VERIFICATION_CODE_LEN,
};
use crate::error::VerificationServiceError;
use crate::usecase::avatar::AvatarProvider;

pub struct RedeemCodeInput {
    pub email: String,
    pub code: String,
    /// When present, an account and profile are created after the code is
    /// consumed.
    pub account: Option<AccountDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    Verified,
    Registered { user_id: Uuid },
}

impl RedeemOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified => "Email verified successfully",
            Self::Registered { .. } => "Email verified and account created successfully",
        }
    }
}

fn well_formed(code: &str) -> bool {
    code.len() == VERIFICATION_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

pub struct RedeemCodeUseCase<R, I, P, A>
where
    R: VerificationCodeRepository,
    I: IdentityProvider,
    P: ProfileRepository,
    A: AvatarProvider,
{
    pub codes: R,
    pub identities: I,
    pub profiles: P,
    pub avatars: A,
}

impl<R, I, P, A> RedeemCodeUseCase<R, I, P, A>
where
    R: VerificationCodeRepository,
    I: IdentityProvider,
    P: ProfileRepository,
    A: AvatarProvider,
{
    pub async fn execute(
        &self,
        input: RedeemCodeInput,
    ) -> Result<RedeemOutcome, VerificationServiceError> {
        if input.email.trim().is_empty() || input.code.is_empty() {
            return Err(VerificationServiceError::InvalidInput(
                "email and code are required".to_owned(),
            ));
        }

        // A malformed code cannot match any stored record.
        if !well_formed(&input.code) {
            return Err(VerificationServiceError::InvalidOrExpiredCode);
        }

        // 1. Newest unverified, unexpired record for email + code
        let now = Utc::now();
        let record = self
            .codes
            .find_latest_redeemable(&input.email, &input.code, now)
            .await?
            .filter(|r| r.redeemable_by(&input.email, &input.code, now))
            .ok_or(VerificationServiceError::InvalidOrExpiredCode)?;

        // 2. Consume exactly that record; losing a race reads as a used code
        if !self.codes.mark_verified(record.id).await? {
            return Err(VerificationServiceError::InvalidOrExpiredCode);
        }
        tracing::info!(email = %input.email, record_id = %record.id, "verification code redeemed");

        let Some(account) = input.account else {
            return Ok(RedeemOutcome::Verified);
        };

        // 3. Provision the identity; the code stays consumed on failure
        let user_id = self
            .identities
            .create_user(&NewIdentity {
                email: input.email.clone(),
                password: account.password.clone(),
                email_confirmed: true,
                metadata: IdentityMetadata {
                    first_name: account.first_name.clone(),
                    last_name: account.last_name.clone(),
                    city: account.city.clone(),
                    phone_number: account.phone_number.clone(),
                },
            })
            .await
            .inspect_err(|_| {
                tracing::warn!(email = %input.email, "code consumed but account creation failed");
            })?;
        tracing::info!(email = %input.email, %user_id, "account created");

        // 4. Profile write is best effort; the account already exists
        if let Err(e) = self.write_profile(user_id, &input.email, &account).await {
            tracing::error!(%user_id, error = ?e, "profile write failed");
        }

        Ok(RedeemOutcome::Registered { user_id })
    }

    /// Insert the profile if absent, otherwise update it. Keyed by user id.
    async fn write_profile(
        &self,
        user_id: Uuid,
        email: &str,
        account: &AccountDetails,
    ) -> Result<(), VerificationServiceError> {
        let now = Utc::now();
        match self.profiles.find_by_user_id(user_id).await? {
            Some(existing) => {
                let avatar_url = existing.avatar_url.clone().or_else(|| {
                    Some(
                        self.avatars
                            .avatar_url(&account.first_name, &account.last_name),
                    )
                });
                let profile = Profile {
                    email: email.to_owned(),
                    first_name: account.first_name.clone(),
                    last_name: account.last_name.clone(),
                    city: account.city.clone(),
                    phone_number: account.phone_number.clone(),
                    avatar_url,
                    updated_at: now,
                    ..existing
                };
                self.profiles.update(&profile).await
            }
            None => {
                let profile = Profile {
                    id: Uuid::now_v7(),
                    user_id,
                    email: email.to_owned(),
                    first_name: account.first_name.clone(),
                    last_name: account.last_name.clone(),
                    city: account.city.clone(),
                    phone_number: account.phone_number.clone(),
                    avatar_url: Some(
                        self.avatars
                            .avatar_url(&account.first_name, &account.last_name),
                    ),
                    created_at: now,
                    updated_at: now,
                };
                self.profiles.create(&profile).await
            }
        }
    }
}
