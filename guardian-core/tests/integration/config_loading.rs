use guardian_core::foundation::GuardianError;
use guardian_core::infrastructure::config::{load_config, load_config_from_file, resolve_config_path, GuardianConfig, CONFIG_FILE_NAME};
use crate::fixtures::lock_env;
use std::env;
use std::time::Duration;

#[test]
fn test_config_loading_when_file_missing_then_defaults() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");

    let config = load_config(data_dir.path()).expect("load config");
    let defaults = GuardianConfig::default();
    assert_eq!(config.broadcast.gossip_send_capacity, defaults.broadcast.gossip_send_capacity);
    assert!(!config.broadcast.enable_relayer);
    assert_eq!(config.retry.policy(), guardian_core::domain::RetryPolicy::default());
    assert_eq!(config.retry.sweep_interval(), Duration::from_secs(60));
    assert_eq!(config.logging.filters, "info");
    assert!(config.logging.log_dir.is_none());
}

#[test]
fn test_config_loading_when_toml_partial_then_merged_with_defaults() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "[broadcast]\nenable_relayer = true\nrelayer_queue_capacity = 16\n\n\
         [retry]\nfirst_retry_min_wait_secs = 30\n\n\
         [logging]\nfilters = \"debug\"\n",
    )
    .expect("write toml");

    let config = load_config_from_file(&path).expect("load config");
    assert!(config.broadcast.enable_relayer);
    assert_eq!(config.broadcast.relayer_queue_capacity, 16);
    assert_eq!(config.broadcast.observation_inbox_capacity, 5_000);
    assert_eq!(config.retry.policy().first_retry_min_wait, Duration::from_secs(30));
    assert_eq!(config.retry.policy().max_retry_wait, Duration::from_secs(4 * 60 * 60));
    assert_eq!(config.logging.filters, "debug");
}

#[test]
fn test_config_loading_when_env_override_then_env_wins_over_file() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[retry]\nsweep_interval_secs = 30\n").expect("write toml");

    env::set_var("GUARDIAN_RETRY__SWEEP_INTERVAL_SECS", "5");
    env::set_var("GUARDIAN_BROADCAST__GOSSIP_SEND_CAPACITY", "128");
    let result = load_config_from_file(&path);
    env::remove_var("GUARDIAN_RETRY__SWEEP_INTERVAL_SECS");
    env::remove_var("GUARDIAN_BROADCAST__GOSSIP_SEND_CAPACITY");

    let config = result.expect("load config");
    assert_eq!(config.retry.sweep_interval_secs, 5);
    assert_eq!(config.broadcast.gossip_send_capacity, 128);
}

#[test]
fn test_config_loading_when_invalid_values_then_config_error_lists_them() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[retry]\nsweep_interval_secs = 0\nfirst_retry_min_wait_secs = 600\nmax_retry_wait_secs = 60\n")
        .expect("write toml");

    match load_config_from_file(&path) {
        Err(GuardianError::ConfigError(message)) => {
            assert!(message.contains("sweep_interval_secs"), "{message}");
            assert!(message.contains("max_retry_wait_secs"), "{message}");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_config_loading_when_toml_malformed_then_config_error() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[retry]\nsweep_interval_secs = \"soon\"\n").expect("write toml");

    assert!(matches!(load_config_from_file(&path), Err(GuardianError::ConfigError(_))));
}

#[test]
fn test_resolve_config_path_when_env_set_then_env_path_used() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    assert_eq!(resolve_config_path(data_dir.path()), data_dir.path().join(CONFIG_FILE_NAME));

    env::set_var("GUARDIAN_CONFIG_PATH", "/etc/guardian/custom.toml");
    let resolved = resolve_config_path(data_dir.path());
    env::set_var("GUARDIAN_CONFIG_PATH", "   ");
    let blank = resolve_config_path(data_dir.path());
    env::remove_var("GUARDIAN_CONFIG_PATH");

    assert_eq!(resolved, std::path::PathBuf::from("/etc/guardian/custom.toml"));
    assert_eq!(blank, data_dir.path().join(CONFIG_FILE_NAME));
}
