use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chow_core::error::ErrorBody;

/// Verification service error variants.
#[derive(Debug, thiserror::Error)]
pub enum VerificationServiceError {
    #[error("{0}")]
    InvalidInput(String),
    /// Wrong code, expired code, used code and unknown email all map here.
    #[error("invalid or expired verification code")]
    InvalidOrExpiredCode,
    #[error("failed to access verification store")]
    Storage(#[source] anyhow::Error),
    #[error("failed to send verification email")]
    Delivery(#[source] anyhow::Error),
    /// The code was consumed but the account could not be created. Shows the
    /// provider's reason.
    #[error("email verified but account creation failed: {0}")]
    IdentityProvisioning(#[source] anyhow::Error),
    #[error("failed to write profile")]
    ProfileWrite(#[source] anyhow::Error),
    #[error("place search failed")]
    Upstream(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl VerificationServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::Storage(_) => "STORAGE",
            Self::Delivery(_) => "DELIVERY",
            Self::IdentityProvisioning(_) => "IDENTITY_PROVISIONING",
            Self::ProfileWrite(_) => "PROFILE_WRITE",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn source_chain(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Storage(e)
            | Self::Delivery(e)
            | Self::IdentityProvisioning(e)
            | Self::ProfileWrite(e)
            | Self::Upstream(e)
            | Self::Internal(e) => Some(e),
            Self::InvalidInput(_) | Self::InvalidOrExpiredCode => None,
        }
    }
}

impl From<JsonRejection> for VerificationServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for VerificationServiceError {
    fn into_response(self) -> Response {
        // Every failure is a 500 carrying an `error` message.
        if let Some(e) = self.source_chain() {
            let chain = format!("{e:#}");
            tracing::error!(error = %chain, kind = self.kind(), "request failed");
        }
        ErrorBody::new(self.kind(), self.to_string()).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
