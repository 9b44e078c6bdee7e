//! Card request handlers - raising requests and moving them through the
//! dispatch workflow.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CardRequest, NewCardRequest, UpdateCardRequest};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};

/// Card request creation payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCardRequestRequest {
    #[validate(length(min = 1, message = "Branch name is required"))]
    #[schema(example = "Lagos Branch")]
    pub branch_name: String,
    #[validate(length(min = 1, message = "Card type is required"))]
    #[schema(example = "Visa Debit Card")]
    pub card_type: String,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    #[schema(example = 100)]
    pub quantity: i32,
    #[schema(value_type = f64, example = 2500.00)]
    pub card_charges: Decimal,
    #[validate(length(min = 1, message = "Batch is required"))]
    #[schema(example = "Batch-2024-001")]
    pub batch: String,
}

impl From<CreateCardRequestRequest> for NewCardRequest {
    fn from(payload: CreateCardRequestRequest) -> Self {
        Self {
            branch_name: payload.branch_name,
            card_type: payload.card_type,
            quantity: payload.quantity,
            card_charges: payload.card_charges,
            batch: payload.batch,
        }
    }
}

/// Card request update payload; status is rejected here and must go
/// through the status endpoint
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCardRequestRequest {
    #[schema(example = "Abuja Branch")]
    pub branch_name: Option<String>,
    #[schema(example = "Verve Debit Card")]
    pub card_type: Option<String>,
    #[schema(example = 250)]
    pub quantity: Option<i32>,
    #[schema(value_type = Option<f64>, example = 3100.50)]
    pub card_charges: Option<Decimal>,
    #[schema(example = "Batch-2024-002")]
    pub batch: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateCardRequestRequest> for UpdateCardRequest {
    fn from(payload: UpdateCardRequestRequest) -> Self {
        Self {
            branch_name: payload.branch_name,
            card_type: payload.card_type,
            quantity: payload.quantity,
            card_charges: payload.card_charges,
            batch: payload.batch,
            status: payload.status,
        }
    }
}

/// Status transition payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdvanceStatusRequest {
    /// The status to move to; must be the direct successor of the current one
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "In Progress")]
    pub status: String,
}

/// Create card request routes
pub fn card_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_card_requests).post(create_card_request))
        .route(
            "/:id",
            get(get_card_request)
                .patch(update_card_request)
                .delete(delete_card_request),
        )
        .route("/:id/status", patch(advance_card_request_status))
}

/// Raise a new card request
#[utoipa::path(
    post,
    path = "/card-requests",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    request_body = CreateCardRequestRequest,
    responses(
        (status = 201, description = "Card request created with Pending status", body = CardRequest),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Batch already exists")
    )
)]
pub async fn create_card_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCardRequestRequest>,
) -> AppResult<Created<CardRequest>> {
    let request = state
        .request_service
        .create(payload.into(), user.id)
        .await?;

    Ok(Created(request))
}

/// List all card requests
#[utoipa::path(
    get,
    path = "/card-requests",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All card requests, most recent first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_card_requests(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CardRequest>>>> {
    let requests = state.request_service.list().await?;

    Ok(Json(ApiResponse::success(requests)))
}

/// Get a card request by ID
#[utoipa::path(
    get,
    path = "/card-requests/{id}",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card request ID")),
    responses(
        (status = 200, description = "Card request found", body = CardRequest),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Card request not found")
    )
)]
pub async fn get_card_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CardRequest>>> {
    let request = state.request_service.get(id).await?;

    Ok(Json(ApiResponse::success(request)))
}

/// Move a card request one step forward in the workflow
#[utoipa::path(
    patch,
    path = "/card-requests/{id}/status",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card request ID")),
    request_body = AdvanceStatusRequest,
    responses(
        (status = 200, description = "Status advanced", body = CardRequest),
        (status = 400, description = "Transition is not the single allowed next step"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Card request not found")
    )
)]
pub async fn advance_card_request_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AdvanceStatusRequest>,
) -> AppResult<Json<ApiResponse<CardRequest>>> {
    let request = state
        .request_service
        .advance_status(id, &payload.status)
        .await?;

    Ok(Json(ApiResponse::with_message(
        request,
        "Status updated successfully",
    )))
}

/// Update card request fields other than status
#[utoipa::path(
    patch,
    path = "/card-requests/{id}",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card request ID")),
    request_body = UpdateCardRequestRequest,
    responses(
        (status = 200, description = "Card request updated", body = CardRequest),
        (status = 400, description = "Empty payload or status key present"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Card request not found"),
        (status = 409, description = "Batch already exists")
    )
)]
pub async fn update_card_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCardRequestRequest>,
) -> AppResult<Json<ApiResponse<CardRequest>>> {
    let request = state
        .request_service
        .update_fields(id, payload.into())
        .await?;

    Ok(Json(ApiResponse::success(request)))
}

/// Delete a card request
#[utoipa::path(
    delete,
    path = "/card-requests/{id}",
    tag = "Card Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card request ID")),
    responses(
        (status = 204, description = "Card request deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Card request not found")
    )
)]
pub async fn delete_card_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.request_service.delete(id).await?;

    Ok(NoContent)
}
