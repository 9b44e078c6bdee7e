//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod card_profile_repository;
mod card_request_repository;
pub(crate) mod entities;
mod user_repository;

pub use card_profile_repository::{CardProfileRepository, CardProfileStore};
pub use card_request_repository::{CardRequestRepository, CardRequestStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use card_profile_repository::MockCardProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use card_request_repository::MockCardRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
