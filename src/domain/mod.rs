//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod card_profile;
pub mod card_request;
pub mod password;
pub mod user;

pub use card_profile::{normalize_fees, CardProfile, Fee, NewCardProfile, UpdateCardProfile};
pub use card_request::{CardRequest, NewCardRequest, RequestStatus, UpdateCardRequest};
pub use password::Password;
pub use user::{User, UserResponse, UserRole};
