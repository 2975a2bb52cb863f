//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use fieldnav_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn clear_env() {
    for key in [
        "FIELDNAV_MILEAGE_RATE",
        "FIELDNAV_MILEAGE_THRESHOLD_M",
        "FIELDNAV_MAX_DISTANCE_M",
        "FIELDNAV_OPTIMAL_LIMIT",
        "FIELDNAV_NEARBY_RADIUS_M",
        "FIELDNAV_TRAVEL_MINUTES_PER_KM",
        "FIELDNAV_GEOFENCE_RADIUS_M",
        "FIELDNAV_AUDIT_TIMEOUT_MS",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
mileage_rate_per_km = 0.75
default_limit = 5
"#
    )
    .unwrap();

    env::set_var("FIELDNAV_MILEAGE_RATE", "0.9");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.mileage_rate_per_km.value, 0.9);
    assert_eq!(config.mileage_rate_per_km.source, ConfigSource::Environment);
    assert_eq!(config.default_limit.value, 5);
    assert_eq!(config.default_limit.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("FIELDNAV_MILEAGE_THRESHOLD_M", "not-a-number");
    env::set_var("FIELDNAV_OPTIMAL_LIMIT", "0");
    env::set_var("FIELDNAV_AUDIT_TIMEOUT_MS", "-5");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.mileage_threshold_m.value, 100.0);
    assert_eq!(config.mileage_threshold_m.source, ConfigSource::Default);
    assert_eq!(config.default_limit.value, 3);
    assert_eq!(config.audit_timeout_ms.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_zero_env_values_match_file_rules() {
    clear_env();
    env::set_var("FIELDNAV_GEOFENCE_RADIUS_M", "0");
    env::set_var("FIELDNAV_MAX_DISTANCE_M", "0");
    env::set_var("FIELDNAV_NEARBY_RADIUS_M", "0.0");
    env::set_var("FIELDNAV_AUDIT_TIMEOUT_MS", "0");
    env::set_var("FIELDNAV_MILEAGE_THRESHOLD_M", "0");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.default_geofence_radius_m.value, 100.0);
    assert_eq!(config.default_geofence_radius_m.source, ConfigSource::Default);
    assert_eq!(config.default_max_distance_m.source, ConfigSource::Default);
    assert_eq!(config.default_nearby_radius_m.source, ConfigSource::Default);
    assert_eq!(config.audit_timeout_ms.value, 3_000);
    assert_eq!(config.audit_timeout_ms.source, ConfigSource::Default);

    // A zero threshold is valid: every exit books mileage
    assert_eq!(config.mileage_threshold_m.value, 0.0);
    assert_eq!(config.mileage_threshold_m.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "mileage_threshold_m = 200.0").unwrap();
    env::set_var("FIELDNAV_MILEAGE_THRESHOLD_M", "300");
    env::set_var("FIELDNAV_AUDIT_TIMEOUT_MS", "750");

    let mut config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();
    config
        .update_from_cli(CliConfigOverrides {
            mileage_threshold_m: Some(50.0),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(config.mileage_threshold_m.value, 50.0);
    assert_eq!(config.mileage_threshold_m.source, ConfigSource::Cli);

    let resolved = config.to_dispatch_config();
    assert_eq!(resolved.mileage_threshold_m, 50.0);
    assert_eq!(resolved.audit_timeout, Duration::from_millis(750));

    clear_env();
}

#[test]
fn test_missing_file_is_config_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/fieldnav.toml");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
