//! Card request service - raising requests and advancing them through the
//! dispatch workflow.
//!
//! The status sequence is fixed: Pending, In Progress, Ready, Dispatched,
//! Acknowledged. A request moves exactly one step forward per call; every
//! other jump is rejected with the single valid next status named in the
//! error. The step itself is delegated to the repository's conditional
//! update so concurrent callers cannot both win.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CardRequest, NewCardRequest, RequestStatus, UpdateCardRequest};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Card request lifecycle operations.
#[async_trait]
pub trait CardRequestService: Send + Sync {
    /// Raise a new request on behalf of the caller
    async fn create(&self, input: NewCardRequest, initiator: Uuid) -> AppResult<CardRequest>;

    /// Fetch a single request by ID
    async fn get(&self, id: i32) -> AppResult<CardRequest>;

    /// All requests, most recently raised first
    async fn list(&self) -> AppResult<Vec<CardRequest>>;

    /// Move a request one step forward in the workflow
    async fn advance_status(&self, id: i32, requested: &str) -> AppResult<CardRequest>;

    /// Merge non-status fields into an existing request
    async fn update_fields(&self, id: i32, changes: UpdateCardRequest) -> AppResult<CardRequest>;

    /// Remove a request permanently
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CardRequestService using Unit of Work.
pub struct RequestWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RequestWorkflow<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn transition_error(current: RequestStatus, requested: &str) -> AppError {
        AppError::invalid_transition(
            current.as_str(),
            requested,
            current.next().map(|next| next.as_str().to_string()),
        )
    }
}

#[async_trait]
impl<U: UnitOfWork> CardRequestService for RequestWorkflow<U> {
    async fn create(&self, input: NewCardRequest, initiator: Uuid) -> AppResult<CardRequest> {
        if input.branch_name.trim().is_empty()
            || input.card_type.trim().is_empty()
            || input.batch.trim().is_empty()
        {
            return Err(AppError::bad_request(
                "branch_name, card_type and batch are required",
            ));
        }
        if input.quantity <= 0 {
            return Err(AppError::bad_request("quantity must be a positive integer"));
        }
        if input.card_charges <= Decimal::ZERO {
            return Err(AppError::bad_request("card_charges must be a positive amount"));
        }

        if self
            .uow
            .card_requests()
            .find_by_batch(&input.batch)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Batch"));
        }

        self.uow.card_requests().create(initiator, input).await
    }

    async fn get(&self, id: i32) -> AppResult<CardRequest> {
        self.uow
            .card_requests()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list(&self) -> AppResult<Vec<CardRequest>> {
        self.uow.card_requests().list().await
    }

    async fn advance_status(&self, id: i32, requested: &str) -> AppResult<CardRequest> {
        let current = self
            .uow
            .card_requests()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        // An unrecognized status name can never be the next step
        let Some(target) = RequestStatus::parse(requested) else {
            return Err(Self::transition_error(current.status, requested));
        };

        if !current.status.allows(target) {
            return Err(Self::transition_error(current.status, requested));
        }

        match self
            .uow
            .card_requests()
            .advance_status(id, current.status, target)
            .await?
        {
            Some(updated) => Ok(updated),
            // Lost a race: the status changed between the read and the
            // conditional update. Report against the fresh state.
            None => {
                let fresh = self
                    .uow
                    .card_requests()
                    .find_by_id(id)
                    .await?
                    .ok_or_not_found()?;
                Err(Self::transition_error(fresh.status, requested))
            }
        }
    }

    async fn update_fields(&self, id: i32, changes: UpdateCardRequest) -> AppResult<CardRequest> {
        if changes.status.is_some() {
            return Err(AppError::bad_request(
                "Status cannot be updated using this endpoint",
            ));
        }

        self.uow
            .card_requests()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if changes.is_empty() {
            return Err(AppError::bad_request("No fields provided for update"));
        }

        if let Some(quantity) = changes.quantity {
            if quantity <= 0 {
                return Err(AppError::bad_request("quantity must be a positive integer"));
            }
        }
        if let Some(charges) = changes.card_charges {
            if charges <= Decimal::ZERO {
                return Err(AppError::bad_request("card_charges must be a positive amount"));
            }
        }

        // The batch label stays unique across requests
        if let Some(batch) = &changes.batch {
            if let Some(existing) = self.uow.card_requests().find_by_batch(batch).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Batch"));
                }
            }
        }

        self.uow.card_requests().update_fields(id, changes).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.card_requests().delete(id).await
    }
}
