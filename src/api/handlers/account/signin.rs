//! Sign-in endpoint.

use axum::{extract::Extension, http::StatusCode, response::Response, Json};
use std::sync::Arc;

use super::message_response;
use super::types::{MessageResponse, SigninRequest};
use super::utils::{normalize_email, valid_email};
use super::workflow::AccountWorkflow;

#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Sign-in successful", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Invalid credentials or email not verified", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ),
    tag = "account"
)]
pub async fn signin(
    workflow: Extension<Arc<AccountWorkflow>>,
    payload: Option<Json<SigninRequest>>,
) -> Response {
    let request: SigninRequest = match payload {
        Some(Json(payload)) => payload,
        None => return message_response(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        // Same response as an unknown account, so the format check leaks
        // nothing about which addresses are registered.
        return message_response(StatusCode::BAD_REQUEST, "Invalid email or password");
    }

    match workflow.signin(&email, &request.password).await {
        Ok(()) => message_response(StatusCode::OK, "Sign-in successful"),
        Err(err) => err.into_response_with("Error signing in"),
    }
}
