//! The account workflow: signup, verify, and sign-in transactions.
//!
//! Each method is one transaction triggered by one inbound request; nothing
//! is shared between calls beyond what the stores persist. Store and sender
//! failures bubble up as [`AccountError::Internal`] and are converted to
//! responses at the handler boundary.

use anyhow::anyhow;
use std::sync::Arc;
use tracing::info;

use crate::api::email::{send_with_retry, EmailMessage, EmailSender};

use super::error::AccountError;
use super::state::AccountConfig;
use super::store::{CredentialStore, InsertOutcome, NewUser, VerificationCodeStore};
use super::utils::{generate_verification_code, hash_password, verify_password};

pub struct AccountWorkflow {
    credentials: Arc<dyn CredentialStore>,
    codes: Arc<dyn VerificationCodeStore>,
    mailer: Arc<dyn EmailSender>,
    config: AccountConfig,
}

impl AccountWorkflow {
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        codes: Arc<dyn VerificationCodeStore>,
        mailer: Arc<dyn EmailSender>,
        config: AccountConfig,
    ) -> Self {
        Self {
            credentials,
            codes,
            mailer,
            config,
        }
    }

    /// Create the credential record, issue a one-time code, and email it.
    ///
    /// # Errors
    /// `DuplicateAccount` when the email is already registered; `Internal`
    /// for store or delivery failures. A delivery failure does not roll back
    /// the committed credential and code records: the account stays
    /// registered and unverified until a fresh code reaches the user.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AccountError> {
        let password_hash = hash_password(password)?;

        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };
        match self.credentials.insert(new_user).await? {
            InsertOutcome::Created => {}
            InsertOutcome::DuplicateEmail => return Err(AccountError::DuplicateAccount),
        }

        // Prior codes for this email are left alone; only an exact
        // (email, code) match inside its TTL can verify.
        let code = generate_verification_code()?;
        self.codes
            .insert(email, &code, self.config.code_ttl())
            .await?;

        let message = EmailMessage {
            to_email: email.to_string(),
            subject: "Verification Code".to_string(),
            body: format!("Your verification code is {code}"),
        };
        send_with_retry(self.mailer.as_ref(), &message, self.config.send_timeout()).await?;

        info!(email = %message.to_email, "verification code sent");

        Ok(())
    }

    /// Consume a matching unexpired code and mark the account verified.
    ///
    /// # Errors
    /// `InvalidCode` when no unexpired `(email, code)` match exists or the
    /// account is already verified; `Internal` when a code exists without a
    /// credential record.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), AccountError> {
        if !self.codes.find_by_email_and_code(email, code).await? {
            return Err(AccountError::InvalidCode);
        }

        let Some(user) = self.credentials.find_by_email(email).await? else {
            // A code without a credential record means the stores disagree.
            return Err(AccountError::Internal(anyhow!(
                "no credential record for verified code"
            )));
        };

        if user.verified {
            // Already active; leftover codes just age out on their own TTL.
            return Err(AccountError::InvalidCode);
        }

        if !self.credentials.set_verified(email).await? {
            return Err(AccountError::Internal(anyhow!(
                "credential record vanished before verification"
            )));
        }

        // Consume the one-time code so it cannot be replayed.
        self.codes.delete_by_email_and_code(email, code).await?;

        info!(email = %email, "account verified");

        Ok(())
    }

    /// Check the password against the stored hash.
    ///
    /// Success is a stateless acknowledgment; no session or token is issued.
    /// Unknown emails and wrong passwords return the same error so callers
    /// cannot probe which addresses are registered.
    ///
    /// # Errors
    /// `InvalidCredentials`, `EmailNotVerified`, or `Internal`.
    pub async fn signin(&self, email: &str, password: &str) -> Result<(), AccountError> {
        let Some(user) = self.credentials.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !user.verified {
            return Err(AccountError::EmailNotVerified);
        }

        if !verify_password(&user.password_hash, password)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(())
    }
}
