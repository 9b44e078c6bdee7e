//! Business logic layer.
//!
//! Services own the application rules: credential handling, admin-only
//! profile management, and the card request dispatch workflow. They depend
//! on repository traits through the Unit of Work, never on SeaORM directly.

pub mod auth_service;
pub mod authorize;
pub mod card_profile_service;
pub mod card_request_service;
pub mod container;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use authorize::require_admin;
pub use card_profile_service::{CardProfileService, ProfileManager};
pub use card_request_service::{CardRequestService, RequestWorkflow};
pub use container::{ServiceContainer, Services};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
