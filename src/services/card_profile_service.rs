//! Card profile service - admin-managed card product templates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CardProfile, NewCardProfile, UpdateCardProfile, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::services::authorize::require_admin;

/// Card profile management operations.
#[async_trait]
pub trait CardProfileService: Send + Sync {
    /// Create a profile owned by the caller; admin only
    async fn create(
        &self,
        input: NewCardProfile,
        caller_id: Uuid,
        caller_role: UserRole,
    ) -> AppResult<CardProfile>;

    /// Fetch a single profile by ID
    async fn get(&self, id: i32) -> AppResult<CardProfile>;

    /// All profiles, newest first
    async fn list(&self) -> AppResult<Vec<CardProfile>>;

    /// Merge the supplied fields into an existing profile; admin only
    async fn update(
        &self,
        id: i32,
        changes: UpdateCardProfile,
        caller_role: UserRole,
    ) -> AppResult<CardProfile>;

    /// Permanently remove a profile; admin only
    async fn delete(&self, id: i32, caller_role: UserRole) -> AppResult<()>;
}

/// Concrete implementation of CardProfileService using Unit of Work.
pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CardProfileService for ProfileManager<U> {
    async fn create(
        &self,
        input: NewCardProfile,
        caller_id: Uuid,
        caller_role: UserRole,
    ) -> AppResult<CardProfile> {
        require_admin(caller_role)?;

        self.uow.card_profiles().create(caller_id, input).await
    }

    async fn get(&self, id: i32) -> AppResult<CardProfile> {
        self.uow
            .card_profiles()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list(&self) -> AppResult<Vec<CardProfile>> {
        self.uow.card_profiles().list().await
    }

    async fn update(
        &self,
        id: i32,
        changes: UpdateCardProfile,
        caller_role: UserRole,
    ) -> AppResult<CardProfile> {
        // Existence is checked before authorization so a missing profile
        // reads as 404 rather than 403 for every caller.
        self.uow
            .card_profiles()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        require_admin(caller_role)?;

        if changes.is_empty() {
            return Err(AppError::bad_request("No fields provided for update"));
        }

        self.uow.card_profiles().update(id, changes).await
    }

    async fn delete(&self, id: i32, caller_role: UserRole) -> AppResult<()> {
        self.uow
            .card_profiles()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        require_admin(caller_role)?;

        self.uow.card_profiles().delete(id).await
    }
}
