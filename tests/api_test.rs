//! API surface tests.
//!
//! Covers the error-to-HTTP mapping, the wire forms of the domain enums,
//! and the response envelope, without requiring a database connection.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};

use card_issuance_api::domain::{RequestStatus, UserRole};
use card_issuance_api::errors::AppError;
use card_issuance_api::types::ApiResponse;

/// Render an AppError the way the HTTP layer does and decode the body.
async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn error_statuses_match_their_variants() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (AppError::conflict("Batch"), StatusCode::CONFLICT),
        (
            AppError::validation("Invalid email format"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::bad_request("No fields provided for update"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::invalid_transition("Pending", "Ready", Some("In Progress".to_string())),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        let (status, _) = render(err).await;
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn error_body_carries_code_and_message() {
    let (_, body) = render(AppError::conflict("Batch")).await;

    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "Batch already exists");
}

#[tokio::test]
async fn invalid_credentials_message_does_not_name_the_field() {
    let (_, body) = render(AppError::InvalidCredentials).await;

    assert_eq!(body["error"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn transition_error_names_the_single_allowed_next_status() {
    let (status, body) = render(AppError::invalid_transition(
        "Pending",
        "Dispatched",
        Some("In Progress".to_string()),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
    assert_eq!(
        body["error"]["message"],
        "Invalid status transition from 'Pending' to 'Dispatched'. Allowed next status: 'In Progress'"
    );
}

#[tokio::test]
async fn terminal_transition_error_says_so() {
    let (_, body) = render(AppError::invalid_transition(
        "Acknowledged",
        "Pending",
        None,
    ))
    .await;

    assert_eq!(
        body["error"]["message"],
        "Invalid status transition from 'Acknowledged' to 'Pending'. 'Acknowledged' is a terminal status"
    );
}

#[tokio::test]
async fn internal_errors_hide_their_details() {
    let (_, body) = render(AppError::internal("connection pool exhausted")).await;

    let message = body["error"]["message"].as_str().unwrap();
    assert!(!message.contains("connection pool"));
}

// =============================================================================
// Wire forms
// =============================================================================

#[test]
fn request_status_serializes_with_spaces() {
    assert_eq!(
        serde_json::to_value(RequestStatus::InProgress).unwrap(),
        json!("In Progress")
    );
    assert_eq!(
        serde_json::from_value::<RequestStatus>(json!("In Progress")).unwrap(),
        RequestStatus::InProgress
    );
}

#[test]
fn user_role_serializes_with_spaces() {
    assert_eq!(
        serde_json::to_value(UserRole::BranchManager).unwrap(),
        json!("Branch Manager")
    );
    assert_eq!(
        serde_json::from_value::<UserRole>(json!("Branch Manager")).unwrap(),
        UserRole::BranchManager
    );
}

// =============================================================================
// Response envelope
// =============================================================================

#[test]
fn api_response_success_shape() {
    let response = ApiResponse::success(vec![1, 2, 3]);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["data"], json!([1, 2, 3]));
    assert!(value.get("message").is_none());
}

#[test]
fn api_response_message_only_shape() {
    let response = ApiResponse::message("Operation completed");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert!(value.get("data").is_none());
    assert_eq!(value["message"], json!("Operation completed"));
}

#[test]
fn api_response_with_message_shape() {
    let response = ApiResponse::with_message(json!({"id": 1}), "Status updated successfully");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["message"], json!("Status updated successfully"));
}
