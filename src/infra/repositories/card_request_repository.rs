//! Card request repository - persistence for the dispatch workflow.
//!
//! The status transition is a single conditional UPDATE matching on both id
//! and the expected current status, so two concurrent callers cannot both
//! advance the same request.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::card_request::{self, Entity as CardRequestEntity};
use crate::domain::{CardRequest, NewCardRequest, RequestStatus, UpdateCardRequest};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Card request persistence operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CardRequestRepository: Send + Sync {
    /// Insert a new request; status starts at `Pending`
    async fn create(&self, initiator: Uuid, request: NewCardRequest) -> AppResult<CardRequest>;

    /// Find request by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardRequest>>;

    /// Find request by its unique batch label
    async fn find_by_batch(&self, batch: &str) -> AppResult<Option<CardRequest>>;

    /// All requests, most recently requested first
    async fn list(&self) -> AppResult<Vec<CardRequest>>;

    /// Conditionally move a request from `from` to `to`.
    ///
    /// Returns `None` when no row matched (the request vanished or its
    /// status changed under us), leaving the caller to re-read and report.
    async fn advance_status(
        &self,
        id: i32,
        from: RequestStatus,
        to: RequestStatus,
    ) -> AppResult<Option<CardRequest>>;

    /// Merge the supplied non-status fields into an existing request
    async fn update_fields(&self, id: i32, changes: UpdateCardRequest) -> AppResult<CardRequest>;

    /// Remove a request permanently
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed implementation of `CardRequestRepository`.
pub struct CardRequestStore {
    db: DatabaseConnection,
}

impl CardRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardRequestRepository for CardRequestStore {
    async fn create(&self, initiator: Uuid, request: NewCardRequest) -> AppResult<CardRequest> {
        let now = Utc::now();
        let active_model = card_request::ActiveModel {
            branch_name: Set(request.branch_name),
            card_type: Set(request.card_type),
            quantity: Set(request.quantity),
            date_requested: Set(now),
            initiator: Set(initiator),
            card_charges: Set(request.card_charges.round_dp(2)),
            batch: Set(request.batch),
            status: Set(RequestStatus::Pending.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(CardRequest::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardRequest>> {
        let result = CardRequestEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CardRequest::from))
    }

    async fn find_by_batch(&self, batch: &str) -> AppResult<Option<CardRequest>> {
        let result = CardRequestEntity::find()
            .filter(card_request::Column::Batch.eq(batch))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CardRequest::from))
    }

    async fn list(&self) -> AppResult<Vec<CardRequest>> {
        let models = CardRequestEntity::find()
            .order_by_desc(card_request::Column::DateRequested)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(CardRequest::from).collect())
    }

    async fn advance_status(
        &self,
        id: i32,
        from: RequestStatus,
        to: RequestStatus,
    ) -> AppResult<Option<CardRequest>> {
        // Single conditional UPDATE; the WHERE clause on the current status
        // is what makes concurrent advances lose cleanly.
        let result = CardRequestEntity::update_many()
            .col_expr(card_request::Column::Status, Expr::value(to.as_str()))
            .col_expr(card_request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(card_request::Column::Id.eq(id))
            .filter(card_request::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn update_fields(&self, id: i32, changes: UpdateCardRequest) -> AppResult<CardRequest> {
        let request = CardRequestEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: card_request::ActiveModel = request.into();

        if let Some(branch_name) = changes.branch_name {
            active.branch_name = Set(branch_name);
        }
        if let Some(card_type) = changes.card_type {
            active.card_type = Set(card_type);
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(card_charges) = changes.card_charges {
            active.card_charges = Set(card_charges.round_dp(2));
        }
        if let Some(batch) = changes.batch {
            active.batch = Set(batch);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(CardRequest::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CardRequestEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
