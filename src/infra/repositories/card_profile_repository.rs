//! Card profile repository - persistence for card product templates.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::card_profile::{self, Entity as CardProfileEntity};
use crate::domain::{CardProfile, Fee, NewCardProfile, UpdateCardProfile};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Card profile persistence operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CardProfileRepository: Send + Sync {
    /// Insert a new profile owned by `owner`
    async fn create(&self, owner: Uuid, profile: NewCardProfile) -> AppResult<CardProfile>;

    /// Find profile by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardProfile>>;

    /// All profiles, newest first
    async fn list(&self) -> AppResult<Vec<CardProfile>>;

    /// Merge the supplied fields into an existing profile
    async fn update(&self, id: i32, changes: UpdateCardProfile) -> AppResult<CardProfile>;

    /// Remove a profile permanently
    async fn delete(&self, id: i32) -> AppResult<()>;
}

fn fees_to_json(fees: &[Fee]) -> AppResult<serde_json::Value> {
    serde_json::to_value(fees).map_err(|e| AppError::internal(format!("Fee encoding failed: {}", e)))
}

/// SeaORM-backed implementation of `CardProfileRepository`.
pub struct CardProfileStore {
    db: DatabaseConnection,
}

impl CardProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardProfileRepository for CardProfileStore {
    async fn create(&self, owner: Uuid, profile: NewCardProfile) -> AppResult<CardProfile> {
        let now = Utc::now();
        let active_model = card_profile::ActiveModel {
            card_name: Set(profile.card_name),
            description: Set(profile.description),
            bin_prefix: Set(profile.bin_prefix),
            card_scheme: Set(profile.card_scheme),
            expiration: Set(profile.expiration),
            currency: Set(profile.currency),
            branch_blacklist: Set(profile.branch_blacklist),
            fees: Set(fees_to_json(&profile.fees)?),
            user_id: Set(owner),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(CardProfile::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardProfile>> {
        let result = CardProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CardProfile::from))
    }

    async fn list(&self) -> AppResult<Vec<CardProfile>> {
        let models = CardProfileEntity::find()
            .order_by_desc(card_profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(CardProfile::from).collect())
    }

    async fn update(&self, id: i32, changes: UpdateCardProfile) -> AppResult<CardProfile> {
        let profile = CardProfileEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: card_profile::ActiveModel = profile.into();

        if let Some(card_name) = changes.card_name {
            active.card_name = Set(card_name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(bin_prefix) = changes.bin_prefix {
            active.bin_prefix = Set(bin_prefix);
        }
        if let Some(card_scheme) = changes.card_scheme {
            active.card_scheme = Set(card_scheme);
        }
        if let Some(expiration) = changes.expiration {
            active.expiration = Set(expiration);
        }
        if let Some(currency) = changes.currency {
            active.currency = Set(currency);
        }
        if let Some(branch_blacklist) = changes.branch_blacklist {
            active.branch_blacklist = Set(Some(branch_blacklist));
        }
        if let Some(fees) = changes.fees {
            active.fees = Set(fees_to_json(&fees)?);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(CardProfile::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CardProfileEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
