//! In-memory collaborators for workflow and handler tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::api::email::{EmailMessage, EmailSender};

use super::state::AccountConfig;
use super::store::{
    CredentialStore, InsertOutcome, NewUser, UserRecord, VerificationCodeStore,
};
use super::workflow::AccountWorkflow;

#[derive(Default)]
pub(crate) struct MemoryCredentialStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryCredentialStore {
    pub(crate) fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.lock().unwrap().get(email).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.get(email))
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Ok(InsertOutcome::DuplicateEmail);
        }
        users.insert(
            user.email.clone(),
            UserRecord {
                id: Uuid::new_v4(),
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                verified: false,
            },
        );
        Ok(InsertOutcome::Created)
    }

    async fn set_verified(&self, email: &str) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(email) {
            Some(user) => {
                user.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

struct CodeRow {
    email: String,
    code: String,
    expires_at: Instant,
}

#[derive(Default)]
pub(crate) struct MemoryCodeStore {
    codes: Mutex<Vec<CodeRow>>,
}

impl MemoryCodeStore {
    pub(crate) fn count_for(&self, email: &str) -> usize {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.email == email)
            .count()
    }
}

#[async_trait]
impl VerificationCodeStore for MemoryCodeStore {
    async fn insert(&self, email: &str, code: &str, ttl: Duration) -> Result<()> {
        self.codes.lock().unwrap().push(CodeRow {
            email: email.to_string(),
            code: code.to_string(),
            expires_at: Instant::now() + ttl,
        });
        Ok(())
    }

    async fn find_by_email_and_code(&self, email: &str, code: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .any(|row| row.email == email && row.code == code && row.expires_at > now))
    }

    async fn delete_by_email_and_code(&self, email: &str, code: &str) -> Result<()> {
        self.codes
            .lock()
            .unwrap()
            .retain(|row| !(row.email == email && row.code == code));
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let now = Instant::now();
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|row| row.expires_at > now);
        Ok(u64::try_from(before - codes.len()).unwrap_or(u64::MAX))
    }
}

#[derive(Default)]
pub(crate) struct RecordingEmailSender {
    messages: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailSender {
    pub(crate) fn sent(&self) -> Vec<EmailMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FailingEmailSender {
    attempts: AtomicUsize,
}

impl FailingEmailSender {
    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _message: &EmailMessage) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("relay unavailable"))
    }
}

/// Pull the code back out of the last recorded verification email.
pub(crate) fn sent_code(mailer: &RecordingEmailSender) -> String {
    let sent = mailer.sent();
    let body = &sent.last().expect("no email sent").body;
    body.rsplit(' ').next().expect("empty email body").to_string()
}

type TestWorkflow = (
    Arc<AccountWorkflow>,
    Arc<MemoryCredentialStore>,
    Arc<MemoryCodeStore>,
    Arc<RecordingEmailSender>,
);

pub(crate) fn test_workflow() -> TestWorkflow {
    test_workflow_with_config(AccountConfig::new())
}

pub(crate) fn test_workflow_with_config(config: AccountConfig) -> TestWorkflow {
    let users = Arc::new(MemoryCredentialStore::default());
    let codes = Arc::new(MemoryCodeStore::default());
    let mailer = Arc::new(RecordingEmailSender::default());
    let workflow = Arc::new(AccountWorkflow::new(
        users.clone(),
        codes.clone(),
        mailer.clone(),
        config,
    ));
    (workflow, users, codes, mailer)
}
