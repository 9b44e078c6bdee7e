//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait rather than on concrete stores, so tests
//! can swap in mock repositories. The database itself is the serialization
//! point; the one read-modify-write hazard (the status transition) is closed
//! with a conditional update inside the request repository, so no explicit
//! transaction management is needed here.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CardProfileRepository, CardProfileStore, CardRequestRepository, CardRequestStore,
    UserRepository, UserStore,
};

/// Centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get card profile repository
    fn card_profiles(&self) -> Arc<dyn CardProfileRepository>;

    /// Get card request repository
    fn card_requests(&self) -> Arc<dyn CardRequestRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    profile_repo: Arc<CardProfileStore>,
    request_repo: Arc<CardRequestStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            profile_repo: Arc::new(CardProfileStore::new(db.clone())),
            request_repo: Arc::new(CardRequestStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn card_profiles(&self) -> Arc<dyn CardProfileRepository> {
        self.profile_repo.clone()
    }

    fn card_requests(&self) -> Arc<dyn CardRequestRepository> {
        self.request_repo.clone()
    }
}
