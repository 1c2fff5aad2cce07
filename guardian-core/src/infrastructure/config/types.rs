use crate::domain::RetryPolicy;
use crate::foundation::{
    FIRST_RETRY_MIN_WAIT_SECS, GOSSIP_SEND_CHANNEL_CAPACITY, MAX_RETRY_WAIT_SECS, OBSERVATION_INBOX_CAPACITY,
    RELAYER_QUEUE_CAPACITY, RETRY_LIMIT_NOT_OURS_SECS, RETRY_LIMIT_OURS_SECS, RETRY_SWEEP_INTERVAL_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GuardianConfig {
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardianConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.broadcast.gossip_send_capacity == 0 {
            errors.push("broadcast.gossip_send_capacity must be > 0".to_string());
        }
        if self.broadcast.observation_inbox_capacity == 0 {
            errors.push("broadcast.observation_inbox_capacity must be > 0".to_string());
        }
        if self.broadcast.enable_relayer && self.broadcast.relayer_queue_capacity == 0 {
            errors.push("broadcast.relayer_queue_capacity must be > 0 when the relayer is enabled".to_string());
        }
        if self.retry.first_retry_min_wait_secs == 0 {
            errors.push("retry.first_retry_min_wait_secs must be > 0".to_string());
        }
        if self.retry.max_retry_wait_secs < self.retry.first_retry_min_wait_secs {
            errors.push(format!(
                "retry.max_retry_wait_secs ({}) must be >= retry.first_retry_min_wait_secs ({})",
                self.retry.max_retry_wait_secs, self.retry.first_retry_min_wait_secs
            ));
        }
        if self.retry.sweep_interval_secs == 0 {
            errors.push("retry.sweep_interval_secs must be > 0".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BroadcastConfig {
    #[serde(default = "default_gossip_send_capacity")]
    pub gossip_send_capacity: usize,
    #[serde(default = "default_observation_inbox_capacity")]
    pub observation_inbox_capacity: usize,
    /// Forward finished quorum certificates to the relayer queue.
    #[serde(default)]
    pub enable_relayer: bool,
    #[serde(default = "default_relayer_queue_capacity")]
    pub relayer_queue_capacity: usize,
}

const fn default_gossip_send_capacity() -> usize {
    GOSSIP_SEND_CHANNEL_CAPACITY
}

const fn default_observation_inbox_capacity() -> usize {
    OBSERVATION_INBOX_CAPACITY
}

const fn default_relayer_queue_capacity() -> usize {
    RELAYER_QUEUE_CAPACITY
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            gossip_send_capacity: default_gossip_send_capacity(),
            observation_inbox_capacity: default_observation_inbox_capacity(),
            enable_relayer: false,
            relayer_queue_capacity: default_relayer_queue_capacity(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_first_retry_min_wait_secs")]
    pub first_retry_min_wait_secs: u64,
    #[serde(default = "default_max_retry_wait_secs")]
    pub max_retry_wait_secs: u64,
    #[serde(default = "default_retry_limit_ours_secs")]
    pub retry_limit_ours_secs: u64,
    #[serde(default = "default_retry_limit_not_ours_secs")]
    pub retry_limit_not_ours_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

const fn default_first_retry_min_wait_secs() -> u64 {
    FIRST_RETRY_MIN_WAIT_SECS
}

const fn default_max_retry_wait_secs() -> u64 {
    MAX_RETRY_WAIT_SECS
}

const fn default_retry_limit_ours_secs() -> u64 {
    RETRY_LIMIT_OURS_SECS
}

const fn default_retry_limit_not_ours_secs() -> u64 {
    RETRY_LIMIT_NOT_OURS_SECS
}

const fn default_sweep_interval_secs() -> u64 {
    RETRY_SWEEP_INTERVAL_SECS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            first_retry_min_wait_secs: default_first_retry_min_wait_secs(),
            max_retry_wait_secs: default_max_retry_wait_secs(),
            retry_limit_ours_secs: default_retry_limit_ours_secs(),
            retry_limit_not_ours_secs: default_retry_limit_not_ours_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            first_retry_min_wait: Duration::from_secs(self.first_retry_min_wait_secs),
            max_retry_wait: Duration::from_secs(self.max_retry_wait_secs),
            retry_limit_ours: Duration::from_secs(self.retry_limit_ours_secs),
            retry_limit_not_ours: Duration::from_secs(self.retry_limit_not_ours_secs),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files; console only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Filter expression understood by `init_logger` (e.g. `"info,guardian_core=debug"`).
    #[serde(default = "default_log_filters")]
    pub filters: String,
}

fn default_log_filters() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_dir: None, filters: default_log_filters() }
    }
}
