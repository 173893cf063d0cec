//! Tests for the Stride configuration system.

use std::sync::Mutex;

use stride_core::config::StrideConfig;
use stride_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all STRIDE_ env vars to prevent cross-test contamination.
fn clear_stride_env_vars() {
    for key in [
        "STRIDE_CONTINUATION_LIMIT",
        "STRIDE_SUPPORT_THRESHOLD",
        "STRIDE_SUPPORT_MODE",
        "STRIDE_DB_PATH",
        "STRIDE_READ_POOL_SIZE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_defaults() {
    let config = StrideConfig::default();
    assert_eq!(config.mining.effective_continuation_limit(), 5);
    assert_eq!(config.mining.effective_support_threshold(), 0.05);
    assert_eq!(config.mining.effective_support_mode(), "absolute");
    assert_eq!(config.storage.effective_db_path(), "stride.db");
    assert_eq!(config.storage.effective_read_pool_size(), 4);
}

#[test]
fn test_from_toml() {
    let config = StrideConfig::from_toml(
        r#"
[mining]
continuation_limit = 3
support_threshold = 0.5
support_mode = "relative"

[storage]
db_path = "custom.db"
"#,
    )
    .unwrap();

    assert_eq!(config.mining.effective_continuation_limit(), 3);
    assert_eq!(config.mining.effective_support_threshold(), 0.5);
    assert_eq!(config.mining.effective_support_mode(), "relative");
    assert_eq!(config.storage.effective_db_path(), "custom.db");
    // Unset fields keep their defaults.
    assert_eq!(config.storage.effective_read_pool_size(), 4);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stride_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("stride.toml"),
        r#"
[mining]
continuation_limit = 7
support_threshold = 0.2
"#,
    )
    .unwrap();

    // Env overrides project config.
    std::env::set_var("STRIDE_CONTINUATION_LIMIT", "9");

    let config = StrideConfig::load(dir.path()).unwrap();
    assert_eq!(config.mining.continuation_limit, Some(9));
    assert_eq!(config.mining.support_threshold, Some(0.2));

    clear_stride_env_vars();
}

#[test]
fn test_load_without_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_stride_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = StrideConfig::load(dir.path()).unwrap();
    assert_eq!(config.mining.effective_continuation_limit(), 5);
    assert_eq!(config.storage.effective_db_path(), "stride.db");
}

#[test]
fn test_threshold_validation() {
    let err = StrideConfig::from_toml("[mining]\nsupport_threshold = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = StrideConfig::from_toml("[mining]\nsupport_threshold = 0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    // 1.0 is inclusive.
    assert!(StrideConfig::from_toml("[mining]\nsupport_threshold = 1.0\n").is_ok());
}

#[test]
fn test_continuation_limit_validation() {
    let err = StrideConfig::from_toml("[mining]\ncontinuation_limit = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_support_mode_validation() {
    let err = StrideConfig::from_toml("[mining]\nsupport_mode = \"both\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = StrideConfig::from_toml("[mining\ncontinuation_limit = 3").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_toml_round_trip() {
    let config = StrideConfig::from_toml(
        "[mining]\ncontinuation_limit = 4\n\n[storage]\nread_pool_size = 2\n",
    )
    .unwrap();
    let serialized = config.to_toml().unwrap();
    let reparsed = StrideConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.mining.continuation_limit, Some(4));
    assert_eq!(reparsed.storage.read_pool_size, Some(2));
}
