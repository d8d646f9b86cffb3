//! Account workflow configuration.

use std::time::Duration;

const DEFAULT_CODE_TTL_SECONDS: i64 = 10 * 60;
const DEFAULT_SEND_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 5 * 60;

#[derive(Clone, Debug)]
pub struct AccountConfig {
    code_ttl_seconds: i64,
    send_timeout_seconds: u64,
    sweep_interval_seconds: u64,
}

impl AccountConfig {
    /// Defaults: 10 minute code TTL, 10s per email send attempt, expired
    /// codes swept every 5 minutes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            send_timeout_seconds: DEFAULT_SEND_TIMEOUT_SECONDS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_code_ttl_seconds(mut self, seconds: i64) -> Self {
        self.code_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_send_timeout_seconds(mut self, seconds: u64) -> Self {
        self.send_timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_sweep_interval_seconds(mut self, seconds: u64) -> Self {
        self.sweep_interval_seconds = seconds;
        self
    }

    #[must_use]
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.code_ttl_seconds).unwrap_or(0))
    }

    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_seconds.max(1))
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self::new()
    }
}
