use anyhow::{Context as _, anyhow};
use serde::Deserialize;
use url::Url;

use crate::domain::repository::PlaceSearch;
use crate::domain::types::Prediction;
use crate::error::VerificationServiceError;

/// Google Places Autocomplete restricted to cities.
#[derive(Clone)]
pub struct GooglePlaceSearch {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

impl GooglePlaceSearch {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    fn request_url(&self, input: &str) -> anyhow::Result<Url> {
        Url::parse_with_params(
            &format!("{}/maps/api/place/autocomplete/json", self.api_url),
            &[
                ("input", input),
                ("types", "(cities)"),
                ("key", self.api_key.as_str()),
            ],
        )
        .context("build autocomplete url")
    }

    async fn search(&self, input: &str) -> anyhow::Result<Vec<Prediction>> {
        // The key rides in the query string; keep it out of error messages.
        let response = self
            .client
            .get(self.request_url(input)?)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("send autocomplete request")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("autocomplete request rejected")?;

        let body: AutocompleteResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("decode autocomplete response")?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(body.predictions),
            status => Err(anyhow!(
                "autocomplete status {status}: {}",
                body.error_message.unwrap_or_default()
            )),
        }
    }
}

impl PlaceSearch for GooglePlaceSearch {
    async fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>, VerificationServiceError> {
        self.search(input)
            .await
            .map_err(VerificationServiceError::Upstream)
    }
}
