use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};

use crate::domain::repository::EmailSender;
use crate::domain::types::EmailMessage;
use crate::error::VerificationServiceError;

/// Sends email through the Resend HTTP API (`POST /emails`).
#[derive(Clone)]
pub struct ResendEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ResendError {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ResendEmailSender {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }

    async fn deliver(&self, message: &EmailMessage) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [&message.to],
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .context("send request to resend")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ResendError>(&body)
                .ok()
                .and_then(|e| match (e.name, e.message) {
                    (Some(name), Some(message)) => Some(format!("{name}: {message}")),
                    (None, Some(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or(body);
            return Err(anyhow!("resend returned {status}: {detail}"));
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .context("decode resend response")?;
        Ok(sent.id)
    }
}

impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), VerificationServiceError> {
        let id = self
            .deliver(message)
            .await
            .map_err(VerificationServiceError::Delivery)?;
        tracing::debug!(to = %message.to, email_id = %id, "verification email accepted by resend");
        Ok(())
    }
}
