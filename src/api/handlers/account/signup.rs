//! Signup endpoint.

use axum::{extract::Extension, http::StatusCode, response::Response, Json};
use std::sync::Arc;

use super::message_response;
use super::types::{MessageResponse, SignupRequest};
use super::utils::{normalize_email, valid_email};
use super::workflow::AccountWorkflow;

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created, verification code sent to email", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Validation error or email already in use", body = MessageResponse),
        (status = 500, description = "Store or email delivery failure", body = MessageResponse)
    ),
    tag = "account"
)]
pub async fn signup(
    workflow: Extension<Arc<AccountWorkflow>>,
    payload: Option<Json<SignupRequest>>,
) -> Response {
    let request: SignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => return message_response(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    let username = request.username.trim();
    if username.is_empty() {
        return message_response(StatusCode::BAD_REQUEST, "Missing username");
    }

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return message_response(StatusCode::BAD_REQUEST, "Invalid email");
    }

    if request.password.is_empty() {
        return message_response(StatusCode::BAD_REQUEST, "Missing password");
    }

    match workflow.signup(username, &email, &request.password).await {
        Ok(()) => message_response(
            StatusCode::CREATED,
            "User created successfully, verification code sent to email",
        ),
        Err(err) => err.into_response_with("Error creating user"),
    }
}
