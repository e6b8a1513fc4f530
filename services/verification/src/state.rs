use std::sync::Arc;

use sea_orm::DatabaseConnection;

use chow_core::health::ReadinessCheck;

use crate::config::VerificationConfig;
use crate::infra::db::{DbProfileRepository, DbVerificationCodeRepository};
use crate::infra::email::ResendEmailSender;
use crate::infra::identity::SupabaseIdentityProvider;
use crate::infra::places::GooglePlaceSearch;
use crate::usecase::avatar::InitialsAvatar;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// One pooled client for every outbound HTTP collaborator.
    pub http: reqwest::Client,
    pub config: Arc<VerificationConfig>,
}

impl AppState {
    pub fn verification_code_repo(&self) -> DbVerificationCodeRepository {
        DbVerificationCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn email_sender(&self) -> ResendEmailSender {
        ResendEmailSender::new(
            self.http.clone(),
            &self.config.resend_api_url,
            &self.config.resend_api_key,
            &self.config.email_from,
        )
    }

    pub fn identity_provider(&self) -> SupabaseIdentityProvider {
        SupabaseIdentityProvider::new(
            self.http.clone(),
            &self.config.supabase_url,
            &self.config.supabase_service_role_key,
        )
    }

    pub fn place_search(&self) -> GooglePlaceSearch {
        GooglePlaceSearch::new(
            self.http.clone(),
            &self.config.google_places_api_url,
            &self.config.google_places_api_key,
        )
    }

    pub fn avatars(&self) -> InitialsAvatar {
        InitialsAvatar::new(&self.config.avatar_base_url)
    }
}

impl ReadinessCheck for AppState {
    async fn is_ready(&self) -> bool {
        self.db.ping().await.is_ok()
    }
}
