//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AuthService, CardProfileService, CardRequestService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Card profile service
    pub profile_service: Arc<dyn CardProfileService>,
    /// Card request service
    pub request_service: Arc<dyn CardRequestService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            profile_service: container.card_profiles(),
            request_service: container.card_requests(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    /// Used by tests to wire in mock services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        profile_service: Arc<dyn CardProfileService>,
        request_service: Arc<dyn CardRequestService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            profile_service,
            request_service,
            database,
        }
    }
}
