use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{EmailSender, VerificationCodeRepository};
use crate::domain::types::{VERIFICATION_CODE_LEN, VERIFICATION_CODE_TTL_SECS, VerificationRecord};
use crate::error::VerificationServiceError;
use crate::usecase::email_template::verification_email;

/// Exclusive upper bound of the numeric code space (10^6).
const CODE_SPACE: u32 = 1_000_000;

/// Uniformly random code in `000000..=999999`, zero-padded.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let n = rng.random_range(0..CODE_SPACE);
    format!("{n:0width$}", width = VERIFICATION_CODE_LEN)
}

pub struct IssueCodeInput {
    pub email: String,
    /// Used in the greeting.
    pub first_name: Option<String>,
}

pub struct IssueCodeUseCase<R, E>
where
    R: VerificationCodeRepository,
    E: EmailSender,
{
    pub codes: R,
    pub mailer: E,
}

impl<R, E> IssueCodeUseCase<R, E>
where
    R: VerificationCodeRepository,
    E: EmailSender,
{
    /// Store a fresh code for the address and email it.
    ///
    /// A delivery failure leaves the stored record in place; it is harmless
    /// and simply expires.
    pub async fn execute(
        &self,
        input: IssueCodeInput,
    ) -> Result<VerificationRecord, VerificationServiceError> {
        if input.email.trim().is_empty() {
            return Err(VerificationServiceError::InvalidInput(
                "email is required".to_owned(),
            ));
        }

        let now = Utc::now();
        let record = VerificationRecord {
            id: Uuid::now_v7(),
            email: input.email,
            code: generate_code(),
            created_at: now,
            expires_at: now + Duration::seconds(VERIFICATION_CODE_TTL_SECS),
            verified: false,
        };

        self.codes.insert(&record).await?;

        let message = verification_email(
            &record.email,
            input.first_name.as_deref(),
            &record.code,
            VERIFICATION_CODE_TTL_SECS / 60,
        );
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(
                email = %record.email,
                record_id = %record.id,
                "verification code stored but email delivery failed"
            );
            return Err(e);
        }

        tracing::info!(email = %record.email, record_id = %record.id, "verification code issued");
        Ok(record)
    }
}
