//! Card Issuance API - backend for tracking physical payment-card
//! production and dispatch.
//!
//! Branches raise card requests that move through a fixed workflow
//! (Pending, In Progress, Ready, Dispatched, Acknowledged) one step at a
//! time, while admins maintain the card product catalogue.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the status state machine
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CardProfile, CardRequest, Password, RequestStatus, User, UserRole};
pub use errors::{AppError, AppResult};
