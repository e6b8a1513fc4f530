use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::IdentityProvider;
use crate::domain::types::{IdentityMetadata, NewIdentity};
use crate::error::VerificationServiceError;

/// Supabase auth (GoTrue) admin client. Creates users with the project's
/// service-role key.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

#[derive(Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: &'a IdentityMetadata,
}

#[derive(Deserialize)]
struct CreatedUser {
    id: Uuid,
}

/// GoTrue reports failures under different keys depending on the endpoint.
#[derive(Deserialize)]
struct GoTrueError {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error_description)
    }
}

impl SupabaseIdentityProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            service_role_key: service_role_key.into(),
        }
    }

    async fn create(&self, identity: &NewIdentity) -> anyhow::Result<Uuid> {
        let response = self
            .client
            .post(format!("{}/auth/v1/admin/users", self.base_url))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&CreateUserRequest {
                email: &identity.email,
                password: &identity.password,
                email_confirm: identity.email_confirmed,
                user_metadata: &identity.metadata,
            })
            .send()
            .await
            .context("send request to identity provider")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GoTrueError>(&body)
                .ok()
                .and_then(GoTrueError::into_message)
                .unwrap_or(body);
            tracing::warn!(%status, "identity provider rejected user creation");
            return Err(anyhow!(detail));
        }

        let user: CreatedUser = response
            .json()
            .await
            .context("decode created user")?;
        Ok(user.id)
    }
}

impl IdentityProvider for SupabaseIdentityProvider {
    async fn create_user(&self, identity: &NewIdentity) -> Result<Uuid, VerificationServiceError> {
        self.create(identity)
            .await
            .map_err(VerificationServiceError::IdentityProvisioning)
    }
}
