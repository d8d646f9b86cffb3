//! Email verification endpoint.

use axum::{extract::Extension, http::StatusCode, response::Response, Json};
use std::sync::Arc;

use super::message_response;
use super::types::{MessageResponse, VerifyRequest};
use super::utils::normalize_email;
use super::workflow::AccountWorkflow;

#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification successful", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Invalid or expired verification code", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ),
    tag = "account"
)]
pub async fn verify(
    workflow: Extension<Arc<AccountWorkflow>>,
    payload: Option<Json<VerifyRequest>>,
) -> Response {
    let request: VerifyRequest = match payload {
        Some(Json(payload)) => payload,
        None => return message_response(StatusCode::BAD_REQUEST, "Missing payload"),
    };

    let email = normalize_email(&request.email);
    let code = request.code.trim();
    if code.is_empty() {
        return message_response(StatusCode::BAD_REQUEST, "Invalid verification code");
    }

    match workflow.verify(&email, code).await {
        Ok(()) => message_response(StatusCode::OK, "Verification successful"),
        Err(err) => err.into_response_with("Error verifying user"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{sent_code, test_workflow};
    use super::*;

    #[tokio::test]
    async fn verify_missing_payload() {
        let (workflow, _users, _codes, _mailer) = test_workflow();
        let response = verify(Extension(workflow), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_blank_code() {
        let (workflow, _users, _codes, _mailer) = test_workflow();
        let response = verify(
            Extension(workflow),
            Some(Json(VerifyRequest {
                email: "alice@example.com".to_string(),
                code: "  ".to_string(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_unknown_code() {
        let (workflow, _users, _codes, _mailer) = test_workflow();
        let response = verify(
            Extension(workflow),
            Some(Json(VerifyRequest {
                email: "alice@example.com".to_string(),
                code: "a1b2c3".to_string(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_success() {
        let (workflow, users, _codes, mailer) = test_workflow();
        workflow
            .signup("alice", "alice@example.com", "hunter2")
            .await
            .unwrap();

        let response = verify(
            Extension(workflow),
            Some(Json(VerifyRequest {
                email: "alice@example.com".to_string(),
                code: sent_code(&mailer),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(users.get("alice@example.com").unwrap().verified);
    }
}
