use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};
use uuid::Uuid;

use chow_verification_schema::{email_verification_codes, profiles};

use crate::domain::repository::{ProfileRepository, VerificationCodeRepository};
use crate::domain::types::{Profile, VerificationRecord};
use crate::error::VerificationServiceError;

// ── Verification code repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationCodeRepository {
    pub db: DatabaseConnection,
}

impl VerificationCodeRepository for DbVerificationCodeRepository {
    async fn insert(&self, record: &VerificationRecord) -> Result<(), VerificationServiceError> {
        email_verification_codes::ActiveModel {
            id: Set(record.id),
            email: Set(record.email.clone()),
            code: Set(record.code.clone()),
            created_at: Set(record.created_at),
            expires_at: Set(record.expires_at),
            verified: Set(record.verified),
        }
        .insert(&self.db)
        .await
        .context("insert verification code")
        .map_err(VerificationServiceError::Storage)?;
        Ok(())
    }

    async fn find_latest_redeemable(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationRecord>, VerificationServiceError> {
        // Ids are v7 UUIDs, so the id tiebreak keeps insertion order for
        // records sharing a timestamp.
        let model = email_verification_codes::Entity::find()
            .filter(email_verification_codes::Column::Email.eq(email))
            .filter(email_verification_codes::Column::Code.eq(code))
            .filter(email_verification_codes::Column::Verified.eq(false))
            .filter(email_verification_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(email_verification_codes::Column::CreatedAt)
            .order_by_desc(email_verification_codes::Column::Id)
            .one(&self.db)
            .await
            .context("find latest redeemable verification code")
            .map_err(VerificationServiceError::Storage)?;
        Ok(model.map(record_from_model))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, VerificationServiceError> {
        let result = email_verification_codes::Entity::update_many()
            .col_expr(email_verification_codes::Column::Verified, Expr::value(true))
            .filter(email_verification_codes::Column::Id.eq(id))
            .filter(email_verification_codes::Column::Verified.eq(false))
            .exec(&self.db)
            .await
            .context("mark verification code verified")
            .map_err(VerificationServiceError::Storage)?;
        Ok(result.rows_affected == 1)
    }
}

fn record_from_model(model: email_verification_codes::Model) -> VerificationRecord {
    VerificationRecord {
        id: model.id,
        email: model.email,
        code: model.code,
        created_at: model.created_at,
        expires_at: model.expires_at,
        verified: model.verified,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Profile>, VerificationServiceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profile by user id")
            .map_err(VerificationServiceError::ProfileWrite)?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &Profile) -> Result<(), VerificationServiceError> {
        active_model(profile)
            .insert(&self.db)
            .await
            .context("create profile")
            .map_err(VerificationServiceError::ProfileWrite)?;
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), VerificationServiceError> {
        active_model(profile)
            .update(&self.db)
            .await
            .context("update profile")
            .map_err(VerificationServiceError::ProfileWrite)?;
        Ok(())
    }
}

fn active_model(profile: &Profile) -> profiles::ActiveModel {
    profiles::ActiveModel {
        id: Set(profile.id),
        user_id: Set(profile.user_id),
        email: Set(profile.email.clone()),
        first_name: Set(profile.first_name.clone()),
        last_name: Set(profile.last_name.clone()),
        city: Set(profile.city.clone()),
        phone_number: Set(profile.phone_number.clone()),
        avatar_url: Set(profile.avatar_url.clone()),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        city: model.city,
        phone_number: model.phone_number,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
