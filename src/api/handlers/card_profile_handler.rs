//! Card profile handlers - CRUD over card product templates.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{normalize_fees, CardProfile, NewCardProfile, UpdateCardProfile};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};

/// Card profile creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCardProfileRequest {
    #[validate(length(min = 1, message = "Card name is required"))]
    #[schema(example = "Platinum Debit Card")]
    pub card_name: String,
    #[schema(example = "Premium banking card with extra benefits")]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "BIN prefix is required"))]
    #[schema(example = "506099")]
    pub bin_prefix: String,
    #[validate(length(min = 1, message = "Card scheme is required"))]
    #[schema(example = "Visa")]
    pub card_scheme: String,
    /// Validity period in months
    #[validate(range(min = 1, message = "Expiration must be at least 1 month"))]
    #[schema(example = 36)]
    pub expiration: i32,
    #[validate(length(min = 1, message = "Currency is required"))]
    #[schema(example = "NGN")]
    pub currency: String,
    #[schema(example = "Lagos Branch")]
    pub branch_blacklist: Option<String>,
    /// Free-form fee list; anything that is not an array of fee records
    /// is stored as an empty list
    #[schema(value_type = Option<Vec<crate::domain::Fee>>)]
    pub fees: Option<serde_json::Value>,
}

impl From<CreateCardProfileRequest> for NewCardProfile {
    fn from(payload: CreateCardProfileRequest) -> Self {
        Self {
            card_name: payload.card_name,
            description: payload.description,
            bin_prefix: payload.bin_prefix,
            card_scheme: payload.card_scheme,
            expiration: payload.expiration,
            currency: payload.currency,
            branch_blacklist: payload.branch_blacklist,
            fees: normalize_fees(payload.fees),
        }
    }
}

/// Card profile update request; all fields optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCardProfileRequest {
    #[schema(example = "Platinum Debit Card v2")]
    pub card_name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "506100")]
    pub bin_prefix: Option<String>,
    #[schema(example = "Mastercard")]
    pub card_scheme: Option<String>,
    #[validate(range(min = 1, message = "Expiration must be at least 1 month"))]
    #[schema(example = 48)]
    pub expiration: Option<i32>,
    #[schema(example = "NGN")]
    pub currency: Option<String>,
    pub branch_blacklist: Option<String>,
    #[schema(value_type = Option<Vec<crate::domain::Fee>>)]
    pub fees: Option<serde_json::Value>,
}

impl From<UpdateCardProfileRequest> for UpdateCardProfile {
    fn from(payload: UpdateCardProfileRequest) -> Self {
        Self {
            card_name: payload.card_name,
            description: payload.description,
            bin_prefix: payload.bin_prefix,
            card_scheme: payload.card_scheme,
            expiration: payload.expiration,
            currency: payload.currency,
            branch_blacklist: payload.branch_blacklist,
            fees: payload.fees.map(|v| normalize_fees(Some(v))),
        }
    }
}

/// Create card profile routes
pub fn card_profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_card_profiles).post(create_card_profile))
        .route(
            "/:id",
            get(get_card_profile)
                .patch(update_card_profile)
                .delete(delete_card_profile),
        )
}

/// Create a new card profile (admin only)
#[utoipa::path(
    post,
    path = "/card-profiles",
    tag = "Card Profiles",
    security(("bearer_auth" = [])),
    request_body = CreateCardProfileRequest,
    responses(
        (status = 201, description = "Card profile created", body = CardProfile),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_card_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCardProfileRequest>,
) -> AppResult<Created<CardProfile>> {
    let profile = state
        .profile_service
        .create(payload.into(), user.id, user.role)
        .await?;

    Ok(Created(profile))
}

/// List all card profiles
#[utoipa::path(
    get,
    path = "/card-profiles",
    tag = "Card Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All card profiles, newest first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_card_profiles(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CardProfile>>>> {
    let profiles = state.profile_service.list().await?;

    Ok(Json(ApiResponse::success(profiles)))
}

/// Get a card profile by ID
#[utoipa::path(
    get,
    path = "/card-profiles/{id}",
    tag = "Card Profiles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card profile ID")),
    responses(
        (status = 200, description = "Card profile found", body = CardProfile),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Card profile not found")
    )
)]
pub async fn get_card_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CardProfile>>> {
    let profile = state.profile_service.get(id).await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// Update a card profile (admin only)
#[utoipa::path(
    patch,
    path = "/card-profiles/{id}",
    tag = "Card Profiles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card profile ID")),
    request_body = UpdateCardProfileRequest,
    responses(
        (status = 200, description = "Card profile updated", body = CardProfile),
        (status = 400, description = "Empty or invalid payload"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Card profile not found")
    )
)]
pub async fn update_card_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCardProfileRequest>,
) -> AppResult<Json<ApiResponse<CardProfile>>> {
    let profile = state
        .profile_service
        .update(id, payload.into(), user.role)
        .await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// Delete a card profile (admin only)
#[utoipa::path(
    delete,
    path = "/card-profiles/{id}",
    tag = "Card Profiles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card profile ID")),
    responses(
        (status = 204, description = "Card profile deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Card profile not found")
    )
)]
pub async fn delete_card_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.profile_service.delete(id, user.role).await?;

    Ok(NoContent)
}
