//! The account workflow and its collaborators.
//!
//! Handlers are the transaction boundary: every failure is converted into a
//! response here and nothing propagates past them. The workflow itself talks
//! to the credential store, the verification code store, and the email
//! sender only through trait objects so tests can substitute in-memory
//! implementations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub mod error;
pub mod postgres;
pub mod signin;
pub mod signup;
pub mod state;
pub mod store;
pub mod sweep;
pub mod types;
pub mod verify;
pub mod workflow;

mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::postgres::{PgCredentialStore, PgVerificationCodeStore};
pub use self::state::AccountConfig;
pub use self::sweep::spawn_expired_code_sweeper;
pub use self::workflow::AccountWorkflow;

use self::types::MessageResponse;

pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}
