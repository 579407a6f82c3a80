use script_telemetry::config::{ENV_GATHER_USAGE_STATS, ENV_HEADLESS};
use script_telemetry::{ScriptRunContext, TelemetryConfig, TelemetryError};

#[test]
fn test_defaults() {
    let config = TelemetryConfig::default();
    assert!(config.gather_usage_stats);
    assert!(!config.headless);
    assert!(config.config_options().is_empty());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TelemetryConfig::from_file(&dir.path().join("absent.json")).unwrap();
    assert!(config.gather_usage_stats);
}

#[test]
fn test_file_options_are_manually_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry.json");
    std::fs::write(&path, r#"{"gather_usage_stats": false, "unrelated": 1}"#).unwrap();

    let config = TelemetryConfig::from_file(&path).unwrap();
    assert!(!config.gather_usage_stats);
    assert!(config.is_manually_set("gather_usage_stats"));
    assert!(!config.is_manually_set("headless"));
    assert!(!config.is_manually_set("unrelated"));

    // New contexts inherit the configured default
    let ctx = ScriptRunContext::from_config(&config);
    assert!(!ctx.gather_usage_stats);
}

#[test]
fn test_bad_file_is_a_parse_error() {
    let err = TelemetryConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, TelemetryError::ConfigParse(_)));
}

// Env vars are process-wide, so every env assertion lives in this one test.
#[test]
fn test_env_overrides() {
    std::env::set_var(ENV_GATHER_USAGE_STATS, "false");
    std::env::set_var(ENV_HEADLESS, "1");

    let config = TelemetryConfig::default().apply_env().unwrap();
    assert!(!config.gather_usage_stats);
    assert!(config.headless);
    assert!(config.is_manually_set("gather_usage_stats"));
    assert!(config.is_manually_set("headless"));

    std::env::set_var(ENV_HEADLESS, "maybe");
    let err = TelemetryConfig::default().apply_env().unwrap_err();
    assert!(matches!(err, TelemetryError::InvalidOption { .. }));

    std::env::remove_var(ENV_GATHER_USAGE_STATS);
    std::env::remove_var(ENV_HEADLESS);
}
