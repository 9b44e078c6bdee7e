//! Service container - dependency injection for services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::infra::Persistence;
use crate::services::{
    AuthService, Authenticator, CardProfileService, CardRequestService, ProfileManager,
    RequestWorkflow,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Container trait for accessing services.
/// Allows mocking the entire service layer in handler tests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get auth service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get card profile service
    fn card_profiles(&self) -> Arc<dyn CardProfileService>;

    /// Get card request service
    fn card_requests(&self) -> Arc<dyn CardRequestService>;
}

/// Production service container wired to the SeaORM-backed Unit of Work.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    profile_service: Arc<dyn CardProfileService>,
    request_service: Arc<dyn CardRequestService>,
}

impl Services {
    /// Build all services from a live database connection.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            profile_service: Arc::new(ProfileManager::new(uow.clone())),
            request_service: Arc::new(RequestWorkflow::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn card_profiles(&self) -> Arc<dyn CardProfileService> {
        self.profile_service.clone()
    }

    fn card_requests(&self) -> Arc<dyn CardRequestService> {
        self.request_service.clone()
    }
}
