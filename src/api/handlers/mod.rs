//! HTTP request handlers.

pub mod auth_handler;
pub mod card_profile_handler;
pub mod card_request_handler;

pub use auth_handler::auth_routes;
pub use card_profile_handler::card_profile_routes;
pub use card_request_handler::card_request_routes;
