use axum::extract::FromRequest;

use crate::error::VerificationServiceError;

pub mod places;
pub mod verification;

/// `axum::Json` whose rejection renders as a [`VerificationServiceError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(VerificationServiceError))]
pub struct JsonBody<T>(pub T);
