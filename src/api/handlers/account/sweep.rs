//! Background reclamation of expired verification codes.
//!
//! Reads already treat expired rows as absent; the sweeper only keeps the
//! table from growing without bound.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

use super::store::VerificationCodeStore;

/// Spawn a task that periodically deletes expired code records.
pub fn spawn_expired_code_sweeper(
    codes: Arc<dyn VerificationCodeStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match codes.delete_expired().await {
                Ok(0) => {}
                Ok(deleted) => info!(deleted, "expired verification codes removed"),
                Err(err) => error!("verification code sweep failed: {err}"),
            }

            sleep(interval).await;
        }
    })
}
