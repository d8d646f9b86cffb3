//! Store contracts for credentials and verification codes.
//!
//! The workflow only depends on these traits; production wiring provides
//! the Postgres implementations and tests provide in-memory ones.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// One credential record per registered email.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verified: bool,
}

/// Fields needed to create a credential record.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Outcome when attempting to create a new credential record.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    DuplicateEmail,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Insert a new record with `verified = false`. Email uniqueness is
    /// enforced by the store itself; a concurrent duplicate surfaces as
    /// [`InsertOutcome::DuplicateEmail`], never as a second record.
    async fn insert(&self, user: NewUser) -> Result<InsertOutcome>;

    /// Set the verified flag. Returns false when no record matches.
    async fn set_verified(&self, email: &str) -> Result<bool>;
}

#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Persist a code valid for `ttl`, independent of prior codes for the
    /// same email.
    async fn insert(&self, email: &str, code: &str, ttl: Duration) -> Result<()>;

    /// Exact match on `(email, code)`. Expired records count as absent.
    async fn find_by_email_and_code(&self, email: &str, code: &str) -> Result<bool>;

    async fn delete_by_email_and_code(&self, email: &str, code: &str) -> Result<()>;

    /// Physically remove expired records. Returns how many were deleted.
    async fn delete_expired(&self) -> Result<u64>;
}
