//! Postgres-backed store implementations.
//!
//! Email uniqueness rests on the unique index over `users.email`: the
//! insert is attempted directly and SQLSTATE 23505 is reported as a
//! duplicate, so concurrent signups for the same address cannot both
//! commit. Code expiry is an `expires_at` timestamp checked at read time;
//! expired rows are indistinguishable from absent ones until the sweeper
//! removes them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::Instrument;

use super::store::{
    CredentialStore, InsertOutcome, NewUser, UserRecord, VerificationCodeStore,
};
use super::utils::is_unique_violation;

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let query = "SELECT id, username, email, password_hash, verified FROM users WHERE email = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up credential record")?;

        Ok(row.map(|row| UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            verified: row.get("verified"),
        }))
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome> {
        let query = r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::DuplicateEmail),
            Err(err) => Err(err).context("failed to insert credential record"),
        }
    }

    async fn set_verified(&self, email: &str) -> Result<bool> {
        let query = "UPDATE users SET verified = TRUE WHERE email = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(email)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to set verified flag")?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgVerificationCodeStore {
    pool: PgPool,
}

impl PgVerificationCodeStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationCodeStore for PgVerificationCodeStore {
    async fn insert(&self, email: &str, code: &str, ttl: Duration) -> Result<()> {
        let query = r"
            INSERT INTO verification_codes (email, code, expires_at)
            VALUES ($1, $2, NOW() + ($3 * INTERVAL '1 second'))
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(email)
            .bind(code)
            .bind(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to insert verification code")?;

        Ok(())
    }

    async fn find_by_email_and_code(&self, email: &str, code: &str) -> Result<bool> {
        let query = r"
            SELECT EXISTS(
                SELECT 1 FROM verification_codes
                WHERE email = $1 AND code = $2 AND expires_at > NOW()
            ) AS found
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .bind(code)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up verification code")?;

        Ok(row.get("found"))
    }

    async fn delete_by_email_and_code(&self, email: &str, code: &str) -> Result<()> {
        let query = "DELETE FROM verification_codes WHERE email = $1 AND code = $2";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(email)
            .bind(code)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to delete verification code")?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let query = "DELETE FROM verification_codes WHERE expires_at <= NOW()";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to delete expired verification codes")?;

        Ok(result.rows_affected())
    }
}
