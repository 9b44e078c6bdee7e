//! Card profile service tests.
//!
//! Exercises the admin-only rules and the not-found-before-forbidden
//! ordering against an in-memory repository.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use card_issuance_api::domain::{
    CardProfile, CardRequest, Fee, NewCardProfile, NewCardRequest, RequestStatus,
    UpdateCardProfile, UpdateCardRequest, User, UserRole,
};
use card_issuance_api::errors::{AppError, AppResult};
use card_issuance_api::infra::{
    CardProfileRepository, CardRequestRepository, UnitOfWork, UserRepository,
};
use card_issuance_api::services::{CardProfileService, ProfileManager};

// =============================================================================
// In-memory repository
// =============================================================================

struct InMemoryCardProfiles {
    rows: Mutex<Vec<CardProfile>>,
    next_id: AtomicI32,
}

impl InMemoryCardProfiles {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl CardProfileRepository for InMemoryCardProfiles {
    async fn create(&self, owner: Uuid, profile: NewCardProfile) -> AppResult<CardProfile> {
        let now = Utc::now();
        let row = CardProfile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            card_name: profile.card_name,
            description: profile.description,
            bin_prefix: profile.bin_prefix,
            card_scheme: profile.card_scheme,
            expiration: profile.expiration,
            currency: profile.currency,
            branch_blacklist: profile.branch_blacklist,
            fees: profile.fees,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CardProfile>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<CardProfile>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, id: i32, changes: UpdateCardProfile) -> AppResult<CardProfile> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(card_name) = changes.card_name {
            row.card_name = card_name;
        }
        if let Some(description) = changes.description {
            row.description = Some(description);
        }
        if let Some(bin_prefix) = changes.bin_prefix {
            row.bin_prefix = bin_prefix;
        }
        if let Some(card_scheme) = changes.card_scheme {
            row.card_scheme = card_scheme;
        }
        if let Some(expiration) = changes.expiration {
            row.expiration = expiration;
        }
        if let Some(currency) = changes.currency {
            row.currency = currency;
        }
        if let Some(branch_blacklist) = changes.branch_blacklist {
            row.branch_blacklist = Some(branch_blacklist);
        }
        if let Some(fees) = changes.fees {
            row.fees = fees;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

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

struct UnusedRequests;

#[async_trait]
impl CardRequestRepository for UnusedRequests {
    async fn create(&self, _initiator: Uuid, _request: NewCardRequest) -> AppResult<CardRequest> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_by_id(&self, _id: i32) -> AppResult<Option<CardRequest>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_by_batch(&self, _batch: &str) -> AppResult<Option<CardRequest>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn list(&self) -> AppResult<Vec<CardRequest>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn advance_status(
        &self,
        _id: i32,
        _from: RequestStatus,
        _to: RequestStatus,
    ) -> AppResult<Option<CardRequest>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn update_fields(&self, _id: i32, _changes: UpdateCardRequest) -> AppResult<CardRequest> {
        Err(AppError::internal("not used in this test"))
    }

    async fn delete(&self, _id: i32) -> AppResult<()> {
        Err(AppError::internal("not used in this test"))
    }
}

struct TestUnitOfWork {
    profiles: Arc<InMemoryCardProfiles>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            profiles: Arc::new(InMemoryCardProfiles::new()),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(UnusedUsers)
    }

    fn card_profiles(&self) -> Arc<dyn CardProfileRepository> {
        self.profiles.clone()
    }

    fn card_requests(&self) -> Arc<dyn CardRequestRepository> {
        Arc::new(UnusedRequests)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn manager() -> ProfileManager<TestUnitOfWork> {
    ProfileManager::new(Arc::new(TestUnitOfWork::new()))
}

fn new_profile(name: &str) -> NewCardProfile {
    NewCardProfile {
        card_name: name.to_string(),
        description: Some("Premium banking card".to_string()),
        bin_prefix: "506099".to_string(),
        card_scheme: "Visa".to_string(),
        expiration: 36,
        currency: "NGN".to_string(),
        branch_blacklist: None,
        fees: vec![Fee {
            name: "Maintenance Fee".to_string(),
            value: 150.0,
            currency: "NGN".to_string(),
            frequency: "Monthly".to_string(),
            fee_impact: "Issuance".to_string(),
        }],
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn admin_can_create_profile_with_fees() {
    let service = manager();
    let admin = Uuid::new_v4();

    let profile = service
        .create(new_profile("Platinum"), admin, UserRole::Admin)
        .await
        .unwrap();

    assert_eq!(profile.card_name, "Platinum");
    assert_eq!(profile.user_id, admin);
    assert_eq!(profile.fees.len(), 1);
    assert_eq!(profile.fees[0].name, "Maintenance Fee");
}

#[tokio::test]
async fn non_admin_cannot_create_profile() {
    let service = manager();

    for role in [UserRole::BranchManager, UserRole::User] {
        let err = service
            .create(new_profile("Platinum"), Uuid::new_v4(), role)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}

#[tokio::test]
async fn missing_profile_reads_as_not_found_before_forbidden() {
    let service = manager();

    // A non-admin hitting a missing profile gets 404, not 403
    let err = service
        .update(999, UpdateCardProfile::default(), UserRole::User)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = service.delete(999, UserRole::User).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn non_admin_cannot_update_or_delete_existing_profile() {
    let service = manager();
    let profile = service
        .create(new_profile("Platinum"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    let err = service
        .update(
            profile.id,
            UpdateCardProfile {
                card_name: Some("Gold".to_string()),
                ..Default::default()
            },
            UserRole::BranchManager,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = service
        .delete(profile.id, UserRole::BranchManager)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn empty_update_payload_is_rejected() {
    let service = manager();
    let profile = service
        .create(new_profile("Platinum"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    let err = service
        .update(profile.id, UpdateCardProfile::default(), UserRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn update_merges_fields_and_replaces_fees() {
    let service = manager();
    let profile = service
        .create(new_profile("Platinum"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    let updated = service
        .update(
            profile.id,
            UpdateCardProfile {
                card_name: Some("Platinum v2".to_string()),
                fees: Some(vec![]),
                ..Default::default()
            },
            UserRole::Admin,
        )
        .await
        .unwrap();

    assert_eq!(updated.card_name, "Platinum v2");
    assert!(updated.fees.is_empty());
    // Untouched fields survive
    assert_eq!(updated.card_scheme, "Visa");
    assert_eq!(updated.expiration, 36);
}

#[tokio::test]
async fn admin_can_delete_and_get_then_returns_not_found() {
    let service = manager();
    let profile = service
        .create(new_profile("Platinum"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    service.delete(profile.id, UserRole::Admin).await.unwrap();

    assert!(matches!(
        service.get(profile.id).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn any_authenticated_role_can_read_profiles() {
    let service = manager();
    service
        .create(new_profile("Platinum"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();
    service
        .create(new_profile("Gold"), Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    // Reads take no role argument; listing works for any caller
    let all = service.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
