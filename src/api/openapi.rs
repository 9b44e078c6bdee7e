//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, card_profile_handler, card_request_handler};
use crate::domain::{CardProfile, CardRequest, Fee, RequestStatus, UserResponse, UserRole};
use crate::services::TokenResponse;

/// OpenAPI documentation for the card issuance API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Issuance API",
        version = "0.1.0",
        description = "Backend for tracking physical payment-card production and dispatch",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:7000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Card profile endpoints
        card_profile_handler::create_card_profile,
        card_profile_handler::list_card_profiles,
        card_profile_handler::get_card_profile,
        card_profile_handler::update_card_profile,
        card_profile_handler::delete_card_profile,
        // Card request endpoints
        card_request_handler::create_card_request,
        card_request_handler::list_card_requests,
        card_request_handler::get_card_request,
        card_request_handler::advance_card_request_status,
        card_request_handler::update_card_request,
        card_request_handler::delete_card_request,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            CardProfile,
            CardRequest,
            Fee,
            RequestStatus,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Card profile handler types
            card_profile_handler::CreateCardProfileRequest,
            card_profile_handler::UpdateCardProfileRequest,
            // Card request handler types
            card_request_handler::CreateCardRequestRequest,
            card_request_handler::UpdateCardRequestRequest,
            card_request_handler::AdvanceStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Card Profiles", description = "Card product template management"),
        (name = "Card Requests", description = "Card request workflow operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
