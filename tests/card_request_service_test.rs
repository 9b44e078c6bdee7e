//! Card request workflow tests.
//!
//! Uses an in-memory repository so the whole service path runs without a
//! database, including the conditional-update semantics of the status
//! transition.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use card_issuance_api::domain::{
    CardProfile, CardRequest, NewCardProfile, NewCardRequest, RequestStatus, UpdateCardProfile,
    UpdateCardRequest, User, UserRole,
};
use card_issuance_api::errors::{AppError, AppResult};
use card_issuance_api::infra::{
    CardProfileRepository, CardRequestRepository, UnitOfWork, UserRepository,
};
use card_issuance_api::services::{CardRequestService, RequestWorkflow};

// =============================================================================
// In-memory repository
// =============================================================================

/// In-memory card request store. `advance_status` mutates under a single
/// lock, mirroring the row-level atomicity of the real conditional UPDATE.
struct InMemoryCardRequests {
    rows: Mutex<Vec<CardRequest>>,
    next_id: AtomicI32,
}

impl InMemoryCardRequests {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl CardRequestRepository for InMemoryCardRequests {
    async fn create(&self, initiator: Uuid, request: NewCardRequest) -> AppResult<CardRequest> {
        let now = Utc::now();
        let row = CardRequest {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            branch_name: request.branch_name,
            card_type: request.card_type,
            quantity: request.quantity,
            initiator,
            card_charges: request.card_charges,
            batch: request.batch,
            status: RequestStatus::Pending,
            date_requested: now,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardRequest>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_batch(&self, batch: &str) -> AppResult<Option<CardRequest>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.batch == batch)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<CardRequest>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.date_requested.cmp(&a.date_requested));
        Ok(rows)
    }

    async fn advance_status(
        &self,
        id: i32,
        from: RequestStatus,
        to: RequestStatus,
    ) -> AppResult<Option<CardRequest>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id && r.status == from) {
            Some(row) => {
                row.status = to;
                row.updated_at = Utc::now();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_fields(&self, id: i32, changes: UpdateCardRequest) -> AppResult<CardRequest> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(branch_name) = changes.branch_name {
            row.branch_name = branch_name;
        }
        if let Some(card_type) = changes.card_type {
            row.card_type = card_type;
        }
        if let Some(quantity) = changes.quantity {
            row.quantity = quantity;
        }
        if let Some(card_charges) = changes.card_charges {
            row.card_charges = card_charges;
        }
        if let Some(batch) = changes.batch {
            row.batch = batch;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// The request workflow never touches users or profiles.
struct UnusedUsers;

#[async_trait]
impl UserRepository for UnusedUsers {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn create(
        &self,
        _name: String,
        _email: String,
        _password_hash: String,
        _role: UserRole,
    ) -> AppResult<User> {
        Err(AppError::internal("not used in this test"))
    }
}

struct UnusedProfiles;

#[async_trait]
impl CardProfileRepository for UnusedProfiles {
    async fn create(&self, _owner: Uuid, _profile: NewCardProfile) -> AppResult<CardProfile> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_by_id(&self, _id: i32) -> AppResult<Option<CardProfile>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn list(&self) -> AppResult<Vec<CardProfile>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn update(&self, _id: i32, _changes: UpdateCardProfile) -> AppResult<CardProfile> {
        Err(AppError::internal("not used in this test"))
    }

    async fn delete(&self, _id: i32) -> AppResult<()> {
        Err(AppError::internal("not used in this test"))
    }
}

struct TestUnitOfWork {
    requests: Arc<InMemoryCardRequests>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            requests: Arc::new(InMemoryCardRequests::new()),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(UnusedUsers)
    }

    fn card_profiles(&self) -> Arc<dyn CardProfileRepository> {
        Arc::new(UnusedProfiles)
    }

    fn card_requests(&self) -> Arc<dyn CardRequestRepository> {
        self.requests.clone()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn workflow() -> RequestWorkflow<TestUnitOfWork> {
    RequestWorkflow::new(Arc::new(TestUnitOfWork::new()))
}

fn new_request(batch: &str) -> NewCardRequest {
    NewCardRequest {
        branch_name: "Lagos Branch".to_string(),
        card_type: "Visa Debit Card".to_string(),
        quantity: 100,
        card_charges: Decimal::new(250000, 2),
        batch: batch.to_string(),
    }
}

fn assert_transition_error(err: AppError, current: &str, requested: &str, next: Option<&str>) {
    match err {
        AppError::InvalidTransition {
            current: c,
            requested: r,
            allowed_next,
        } => {
            assert_eq!(c, current);
            assert_eq!(r, requested);
            assert_eq!(allowed_next.as_deref(), next);
        }
        other => panic!("expected InvalidTransition, got {:?}", other),
    }
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn create_starts_pending_with_caller_as_initiator() {
    let service = workflow();
    let caller = Uuid::new_v4();

    let request = service.create(new_request("Batch-001"), caller).await.unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.initiator, caller);
    assert_eq!(request.batch, "Batch-001");
}

#[tokio::test]
async fn create_rejects_duplicate_batch() {
    let service = workflow();
    let caller = Uuid::new_v4();

    service.create(new_request("Batch-001"), caller).await.unwrap();
    let err = service
        .create(new_request("Batch-001"), caller)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let service = workflow();
    let caller = Uuid::new_v4();

    let mut blank_branch = new_request("Batch-001");
    blank_branch.branch_name = "  ".to_string();
    assert!(matches!(
        service.create(blank_branch, caller).await.unwrap_err(),
        AppError::BadRequest(_)
    ));

    let mut zero_quantity = new_request("Batch-002");
    zero_quantity.quantity = 0;
    assert!(matches!(
        service.create(zero_quantity, caller).await.unwrap_err(),
        AppError::BadRequest(_)
    ));

    let mut negative_charges = new_request("Batch-003");
    negative_charges.card_charges = Decimal::new(-100, 2);
    assert!(matches!(
        service.create(negative_charges, caller).await.unwrap_err(),
        AppError::BadRequest(_)
    ));
}

// =============================================================================
// Status workflow
// =============================================================================

#[tokio::test]
async fn full_workflow_advances_one_step_at_a_time() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    for step in ["In Progress", "Ready", "Dispatched", "Acknowledged"] {
        let updated = service.advance_status(request.id, step).await.unwrap();
        assert_eq!(updated.status.as_str(), step);
    }
}

#[tokio::test]
async fn skipping_a_step_is_rejected_and_names_the_allowed_next() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let err = service.advance_status(request.id, "Ready").await.unwrap_err();
    assert_transition_error(err, "Pending", "Ready", Some("In Progress"));

    // The failed attempt must not have moved the request
    let unchanged = service.get(request.id).await.unwrap();
    assert_eq!(unchanged.status, RequestStatus::Pending);
}

#[tokio::test]
async fn lagos_branch_run_cannot_skip_ready() {
    let service = workflow();
    let initiator = Uuid::new_v4();

    let request = service
        .create(
            NewCardRequest {
                branch_name: "Lagos".to_string(),
                card_type: "Visa".to_string(),
                quantity: 100,
                card_charges: Decimal::new(250000, 2),
                batch: "B-001".to_string(),
            },
            initiator,
        )
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.initiator, initiator);

    let in_progress = service
        .advance_status(request.id, "In Progress")
        .await
        .unwrap();
    assert_eq!(in_progress.status, RequestStatus::InProgress);

    let err = service
        .advance_status(request.id, "Dispatched")
        .await
        .unwrap_err();
    assert_transition_error(err, "In Progress", "Dispatched", Some("Ready"));
}

#[tokio::test]
async fn backward_and_same_status_transitions_are_rejected() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    service.advance_status(request.id, "In Progress").await.unwrap();

    let backward = service.advance_status(request.id, "Pending").await.unwrap_err();
    assert_transition_error(backward, "In Progress", "Pending", Some("Ready"));

    let same = service
        .advance_status(request.id, "In Progress")
        .await
        .unwrap_err();
    assert_transition_error(same, "In Progress", "In Progress", Some("Ready"));
}

#[tokio::test]
async fn terminal_status_cannot_advance() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    for step in ["In Progress", "Ready", "Dispatched", "Acknowledged"] {
        service.advance_status(request.id, step).await.unwrap();
    }

    let err = service
        .advance_status(request.id, "Pending")
        .await
        .unwrap_err();
    assert_transition_error(err, "Acknowledged", "Pending", None);
}

#[tokio::test]
async fn unknown_status_name_is_rejected() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let err = service.advance_status(request.id, "Shipped").await.unwrap_err();
    assert_transition_error(err, "Pending", "Shipped", Some("In Progress"));
}

#[tokio::test]
async fn advance_on_missing_request_is_not_found() {
    let service = workflow();
    let err = service.advance_status(999, "In Progress").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn concurrent_advances_have_a_single_winner() {
    let uow = Arc::new(TestUnitOfWork::new());
    let service = Arc::new(RequestWorkflow::new(uow));
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        service.advance_status(request.id, "In Progress"),
        service.advance_status(request.id, "In Progress"),
    );

    // Exactly one caller moves the request; the other sees the fresh state
    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);

    let loser = outcomes.into_iter().find(|r| r.is_err()).unwrap();
    assert_transition_error(
        loser.unwrap_err(),
        "In Progress",
        "In Progress",
        Some("Ready"),
    );

    let final_state = service.get(request.id).await.unwrap();
    assert_eq!(final_state.status, RequestStatus::InProgress);
}

// =============================================================================
// Field updates
// =============================================================================

#[tokio::test]
async fn update_fields_rejects_status_key() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let err = service
        .update_fields(
            request.id,
            UpdateCardRequest {
                status: Some("Ready".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    match err {
        AppError::BadRequest(msg) => {
            assert_eq!(msg, "Status cannot be updated using this endpoint")
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn update_fields_rejects_empty_payload() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let err = service
        .update_fields(request.id, UpdateCardRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn update_fields_merges_changes() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    let updated = service
        .update_fields(
            request.id,
            UpdateCardRequest {
                quantity: Some(250),
                branch_name: Some("Abuja Branch".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.quantity, 250);
    assert_eq!(updated.branch_name, "Abuja Branch");
    // Untouched fields survive
    assert_eq!(updated.card_type, "Visa Debit Card");
    assert_eq!(updated.batch, "Batch-001");
}

#[tokio::test]
async fn update_fields_enforces_batch_uniqueness_across_requests() {
    let service = workflow();
    let caller = Uuid::new_v4();
    let first = service.create(new_request("Batch-001"), caller).await.unwrap();
    let second = service.create(new_request("Batch-002"), caller).await.unwrap();

    let err = service
        .update_fields(
            second.id,
            UpdateCardRequest {
                batch: Some("Batch-001".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Re-submitting a request's own batch is not a conflict
    let kept = service
        .update_fields(
            first.id,
            UpdateCardRequest {
                batch: Some("Batch-001".to_string()),
                quantity: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.batch, "Batch-001");
}

// =============================================================================
// Deletion and lookup
// =============================================================================

#[tokio::test]
async fn delete_removes_request_and_missing_is_not_found() {
    let service = workflow();
    let request = service
        .create(new_request("Batch-001"), Uuid::new_v4())
        .await
        .unwrap();

    service.delete(request.id).await.unwrap();

    assert!(matches!(
        service.get(request.id).await.unwrap_err(),
        AppError::NotFound
    ));
    assert!(matches!(
        service.delete(request.id).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn list_returns_most_recent_first() {
    let service = workflow();
    let caller = Uuid::new_v4();
    service.create(new_request("Batch-001"), caller).await.unwrap();
    service.create(new_request("Batch-002"), caller).await.unwrap();

    let all = service.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].date_requested >= all[1].date_requested);
}
