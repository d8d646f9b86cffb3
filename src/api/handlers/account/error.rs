//! Account transaction failures and their response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::types::MessageResponse;

/// Everything an account transaction can fail with. Client-facing variants
/// carry a fixed message; `Internal` detail stays in the server log.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email already in use")]
    DuplicateAccount,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email not verified")]
    EmailNotVerified,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AccountError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Convert into a response, logging internal causes server-side and
    /// replacing them with a generic per-endpoint message.
    pub(crate) fn into_response_with(self, internal_message: &str) -> Response {
        match self {
            Self::Internal(err) => {
                error!("{internal_message}: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new(internal_message)),
                )
                    .into_response()
            }
            other => (
                other.status(),
                Json(MessageResponse::new(&other.to_string())),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(AccountError::DuplicateAccount.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AccountError::InvalidCode.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AccountError::InvalidCredentials.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::EmailNotVerified.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_maps_to_server_error() {
        let err = AccountError::Internal(anyhow!("store unavailable"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_messages_are_fixed() {
        assert_eq!(
            AccountError::DuplicateAccount.to_string(),
            "Email already in use"
        );
        assert_eq!(
            AccountError::InvalidCode.to_string(),
            "Invalid verification code"
        );
        assert_eq!(
            AccountError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            AccountError::EmailNotVerified.to_string(),
            "Email not verified"
        );
    }

    #[test]
    fn internal_response_hides_cause() {
        let response = AccountError::Internal(anyhow!("connection refused"))
            .into_response_with("Error creating user");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
