//! Email delivery abstractions.
//!
//! Signup delivers the verification code through an [`EmailSender`]. The
//! production sender posts to a mail relay HTTP API; the default for local
//! dev is [`LogEmailSender`], which logs the message and returns `Ok(())`.
//!
//! Delivery is bounded: [`send_with_retry`] wraps each attempt in a timeout
//! and retries exactly once before giving up. The caller decides what a
//! failed send means for the surrounding transaction.

use crate::APP_USER_AGENT;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the account workflow.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

/// Mail relay connection settings.
#[derive(Debug)]
pub struct RelayConfig {
    pub url: String,
    pub api_key: SecretString,
    pub from_email: String,
    pub from_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelaySendBody {
    sender: RelayAddress,
    to: Vec<RelayAddress>,
    subject: String,
    text_content: String,
}

/// Sender backed by a mail relay HTTP API.
#[derive(Debug)]
pub struct RelayEmailSender {
    client: reqwest::Client,
    config: RelayConfig,
}

impl RelayEmailSender {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("Failed to build mail relay client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailSender for RelayEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let body = RelaySendBody {
            sender: RelayAddress {
                email: self.config.from_email.clone(),
                name: self.config.from_name.clone(),
            },
            to: vec![RelayAddress {
                email: message.to_email.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            text_content: message.body.clone(),
        };

        let response = self
            .client
            .post(&self.config.url)
            .header("api-key", self.config.api_key.expose_secret())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to reach mail relay")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(anyhow!("mail relay send failed (status={status}): {detail}"))
    }
}

/// Send a message bounded by `send_timeout` per attempt, retrying once.
///
/// # Errors
/// Returns the second attempt's error (or a timeout error) if both fail.
pub async fn send_with_retry(
    sender: &dyn EmailSender,
    message: &EmailMessage,
    send_timeout: Duration,
) -> Result<()> {
    match timeout(send_timeout, sender.send(message)).await {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(err)) => warn!("email send failed, retrying once: {err}"),
        Err(_) => warn!("email send timed out after {send_timeout:?}, retrying once"),
    }

    match timeout(send_timeout, sender.send(message)).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!("email send timed out after {send_timeout:?}")),
    }
}
