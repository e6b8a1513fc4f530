use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::Prediction;
use crate::error::VerificationServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::autocomplete::AutocompleteUseCase;

// ── POST /google-places-autocomplete ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct AutocompleteRequest {
    /// Missing and `null` both count as empty input.
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Serialize)]
pub struct AutocompleteResponse {
    pub predictions: Vec<Prediction>,
}

pub async fn google_places_autocomplete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AutocompleteRequest>,
) -> Result<Json<AutocompleteResponse>, VerificationServiceError> {
    let usecase = AutocompleteUseCase {
        places: state.place_search(),
    };
    let predictions = usecase
        .execute(body.input.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(AutocompleteResponse { predictions }))
}
