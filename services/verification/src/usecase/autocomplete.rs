use crate::domain::repository::PlaceSearch;
use crate::domain::types::{MIN_AUTOCOMPLETE_INPUT_CHARS, Prediction};
use crate::error::VerificationServiceError;

pub struct AutocompleteUseCase<S: PlaceSearch> {
    pub places: S,
}

impl<S: PlaceSearch> AutocompleteUseCase<S> {
    /// Forward `input` to the place-search provider. Inputs under two
    /// characters return no predictions without an upstream call.
    pub async fn execute(&self, input: &str) -> Result<Vec<Prediction>, VerificationServiceError> {
        if input.chars().count() < MIN_AUTOCOMPLETE_INPUT_CHARS {
            return Ok(Vec::new());
        }
        self.places.autocomplete(input).await
    }
}
