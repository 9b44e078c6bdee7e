//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod card_profile;
pub mod card_request;
pub mod user;
