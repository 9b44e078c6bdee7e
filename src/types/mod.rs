//! Shared response types for the HTTP layer.

pub mod response;

pub use response::{ApiResponse, Created, NoContent};
