use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::AccountDetails;
use crate::error::VerificationServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::issue::{IssueCodeInput, IssueCodeUseCase};
use crate::usecase::redeem::{RedeemCodeInput, RedeemCodeUseCase};

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SuccessResponse {
    fn new(message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            message,
        })
    }
}

// ── POST /send-verification-email ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationEmailRequest {
    #[serde(default)]
    pub email: String,
    pub first_name: Option<String>,
    /// Accepted for symmetry with sign-up forms; not used in the message.
    pub last_name: Option<String>,
}

pub async fn send_verification_email(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SendVerificationEmailRequest>,
) -> Result<Json<SuccessResponse>, VerificationServiceError> {
    let usecase = IssueCodeUseCase {
        codes: state.verification_code_repo(),
        mailer: state.email_sender(),
    };
    usecase
        .execute(IssueCodeInput {
            email: body.email,
            first_name: body.first_name,
        })
        .await?;
    Ok(SuccessResponse::new("Verification email sent successfully"))
}

// ── POST /verify-email-code ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataRequest {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub phone_number: String,
    pub password: String,
}

impl From<UserDataRequest> for AccountDetails {
    fn from(data: UserDataRequest) -> Self {
        AccountDetails {
            first_name: data.first_name,
            last_name: data.last_name,
            city: data.city,
            phone_number: data.phone_number,
            password: data.password,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailCodeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
    pub user_data: Option<UserDataRequest>,
}

pub async fn verify_email_code(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyEmailCodeRequest>,
) -> Result<Json<SuccessResponse>, VerificationServiceError> {
    tracing::debug!(
        email = %body.email,
        has_user_data = body.user_data.is_some(),
        "verify request received"
    );
    let usecase = RedeemCodeUseCase {
        codes: state.verification_code_repo(),
        identities: state.identity_provider(),
        profiles: state.profile_repo(),
        avatars: state.avatars(),
    };
    let outcome = usecase
        .execute(RedeemCodeInput {
            email: body.email,
            code: body.code,
            account: body.user_data.map(AccountDetails::from),
        })
        .await?;
    Ok(SuccessResponse::new(outcome.message()))
}
