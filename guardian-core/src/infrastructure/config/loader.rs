//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (GUARDIAN_* prefix)

use crate::foundation::GuardianError;
use crate::infrastructure::config::types::GuardianConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Environment variable prefix for config overrides.
///
/// Example: `GUARDIAN_RETRY__SWEEP_INTERVAL_SECS` -> `retry.sweep_interval_secs`
pub const ENV_PREFIX: &str = "GUARDIAN_";

pub const CONFIG_PATH_ENV: &str = "GUARDIAN_CONFIG_PATH";

pub const CONFIG_FILE_NAME: &str = "guardian.toml";

/// Load configuration from the default file in `data_dir`, or from `GUARDIAN_CONFIG_PATH` when set.
pub fn load_config(data_dir: &Path) -> Result<GuardianConfig, GuardianError> {
    load_config_from_file(&resolve_config_path(data_dir))
}

/// Load configuration from a specific file path. A missing file means defaults plus env.
pub fn load_config_from_file(path: &Path) -> Result<GuardianConfig, GuardianError> {
    info!("loading configuration path={}", path.display());
    let mut figment = Figment::new().merge(Serialized::defaults(GuardianConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    // `CONFIG_PATH` shares the prefix; it is not a config key.
    let figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG_PATH", "TEST_NOW_NANOS"]).split("__"));

    let config: GuardianConfig = figment.extract()?;
    config.validate().map_err(|errors| GuardianError::ConfigError(format!("validation failed: {:?}", errors)))?;
    debug!(
        "configuration loaded gossip_send_capacity={} observation_inbox_capacity={} relayer_enabled={} sweep_interval_secs={}",
        config.broadcast.gossip_send_capacity,
        config.broadcast.observation_inbox_capacity,
        config.broadcast.enable_relayer,
        config.retry.sweep_interval_secs
    );
    Ok(config)
}

pub fn resolve_config_path(data_dir: &Path) -> PathBuf {
    if let Ok(value) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    data_dir.join(CONFIG_FILE_NAME)
}
