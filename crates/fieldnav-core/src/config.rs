use crate::error::{FieldnavError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has at least the current precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Resolved tuning values consumed by the dispatch services
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Reimbursement per kilometer of mileage
    pub mileage_rate_per_km: f64,

    /// Check-in to check-out distance that must be exceeded before mileage is booked
    pub mileage_threshold_m: f64,

    /// Default search radius for optimal-worker queries
    pub default_max_distance_m: f64,

    /// Default number of optimal workers returned
    pub default_limit: usize,

    /// Default search radius for nearby-worker queries
    pub default_nearby_radius_m: f64,

    /// Travel-time heuristic
    pub travel_minutes_per_km: f64,

    /// Radius applied to newly registered sites without an explicit one
    pub default_geofence_radius_m: f64,

    /// Upper bound on a single audit notifier call
    pub audit_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        LayeredConfig::with_defaults().to_dispatch_config()
    }
}

/// Layered configuration for FieldNav
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub mileage_rate_per_km: ConfigValue<f64>,
    pub mileage_threshold_m: ConfigValue<f64>,
    pub default_max_distance_m: ConfigValue<f64>,
    pub default_limit: ConfigValue<usize>,
    pub default_nearby_radius_m: ConfigValue<f64>,
    pub travel_minutes_per_km: ConfigValue<f64>,
    pub default_geofence_radius_m: ConfigValue<f64>,
    pub audit_timeout_ms: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            mileage_rate_per_km: ConfigValue::new(0.50, ConfigSource::Default),
            mileage_threshold_m: ConfigValue::new(100.0, ConfigSource::Default),
            default_max_distance_m: ConfigValue::new(50_000.0, ConfigSource::Default),
            default_limit: ConfigValue::new(3, ConfigSource::Default),
            default_nearby_radius_m: ConfigValue::new(10_000.0, ConfigSource::Default),
            travel_minutes_per_km: ConfigValue::new(2.0, ConfigSource::Default),
            default_geofence_radius_m: ConfigValue::new(100.0, ConfigSource::Default),
            audit_timeout_ms: ConfigValue::new(3_000, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FieldnavError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FieldnavError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(rate) = file_config.mileage_rate_per_km {
            self.mileage_rate_per_km.update(non_negative("mileage_rate_per_km", rate)?, ConfigSource::File);
        }

        if let Some(threshold) = file_config.mileage_threshold_m {
            self.mileage_threshold_m
                .update(non_negative("mileage_threshold_m", threshold)?, ConfigSource::File);
        }

        if let Some(distance) = file_config.default_max_distance_m {
            self.default_max_distance_m
                .update(positive("default_max_distance_m", distance)?, ConfigSource::File);
        }

        if let Some(limit) = file_config.default_limit {
            if limit == 0 {
                return Err(FieldnavError::ConfigInvalid {
                    key: "default_limit".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            self.default_limit.update(limit, ConfigSource::File);
        }

        if let Some(radius) = file_config.default_nearby_radius_m {
            self.default_nearby_radius_m
                .update(positive("default_nearby_radius_m", radius)?, ConfigSource::File);
        }

        if let Some(minutes) = file_config.travel_minutes_per_km {
            self.travel_minutes_per_km
                .update(non_negative("travel_minutes_per_km", minutes)?, ConfigSource::File);
        }

        if let Some(radius) = file_config.default_geofence_radius_m {
            self.default_geofence_radius_m
                .update(positive("default_geofence_radius_m", radius)?, ConfigSource::File);
        }

        if let Some(timeout) = file_config.audit_timeout_ms {
            self.audit_timeout_ms
                .update(positive_millis("audit_timeout_ms", timeout)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(rate) = env_f64("FIELDNAV_MILEAGE_RATE", non_negative) {
            self.mileage_rate_per_km.update(rate, ConfigSource::Environment);
        }

        if let Some(threshold) = env_f64("FIELDNAV_MILEAGE_THRESHOLD_M", non_negative) {
            self.mileage_threshold_m.update(threshold, ConfigSource::Environment);
        }

        if let Some(distance) = env_f64("FIELDNAV_MAX_DISTANCE_M", positive) {
            self.default_max_distance_m.update(distance, ConfigSource::Environment);
        }

        if let Ok(limit_str) = env::var("FIELDNAV_OPTIMAL_LIMIT") {
            match limit_str.parse::<usize>() {
                Ok(limit) if limit > 0 => self.default_limit.update(limit, ConfigSource::Environment),
                _ => tracing::warn!(
                    "Invalid FIELDNAV_OPTIMAL_LIMIT value '{}': expected positive integer",
                    limit_str
                ),
            }
        }

        if let Some(radius) = env_f64("FIELDNAV_NEARBY_RADIUS_M", positive) {
            self.default_nearby_radius_m.update(radius, ConfigSource::Environment);
        }

        if let Some(minutes) = env_f64("FIELDNAV_TRAVEL_MINUTES_PER_KM", non_negative) {
            self.travel_minutes_per_km.update(minutes, ConfigSource::Environment);
        }

        if let Some(radius) = env_f64("FIELDNAV_GEOFENCE_RADIUS_M", positive) {
            self.default_geofence_radius_m.update(radius, ConfigSource::Environment);
        }

        if let Ok(timeout_str) = env::var("FIELDNAV_AUDIT_TIMEOUT_MS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) if timeout > 0 => {
                    self.audit_timeout_ms.update(timeout, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid FIELDNAV_AUDIT_TIMEOUT_MS value '{}': expected positive milliseconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if let Some(rate) = overrides.mileage_rate_per_km {
            self.mileage_rate_per_km
                .update(non_negative("mileage_rate_per_km", rate)?, ConfigSource::Cli);
        }

        if let Some(threshold) = overrides.mileage_threshold_m {
            self.mileage_threshold_m
                .update(non_negative("mileage_threshold_m", threshold)?, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.default_geofence_radius_m {
            self.default_geofence_radius_m
                .update(positive("default_geofence_radius_m", radius)?, ConfigSource::Cli);
        }

        Ok(())
    }

    /// Resolve the layered values into the dispatch configuration
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            mileage_rate_per_km: self.mileage_rate_per_km.value,
            mileage_threshold_m: self.mileage_threshold_m.value,
            default_max_distance_m: self.default_max_distance_m.value,
            default_limit: self.default_limit.value,
            default_nearby_radius_m: self.default_nearby_radius_m.value,
            travel_minutes_per_km: self.travel_minutes_per_km.value,
            default_geofence_radius_m: self.default_geofence_radius_m.value,
            audit_timeout: Duration::from_millis(self.audit_timeout_ms.value),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "mileage_rate_per_km".to_string(),
            (format!("{:.2}", self.mileage_rate_per_km.value), self.mileage_rate_per_km.source),
        );
        map.insert(
            "mileage_threshold_m".to_string(),
            (format!("{} m", self.mileage_threshold_m.value), self.mileage_threshold_m.source),
        );
        map.insert(
            "default_max_distance_m".to_string(),
            (format!("{} m", self.default_max_distance_m.value), self.default_max_distance_m.source),
        );
        map.insert(
            "default_limit".to_string(),
            (self.default_limit.value.to_string(), self.default_limit.source),
        );
        map.insert(
            "default_nearby_radius_m".to_string(),
            (format!("{} m", self.default_nearby_radius_m.value), self.default_nearby_radius_m.source),
        );
        map.insert(
            "travel_minutes_per_km".to_string(),
            (self.travel_minutes_per_km.value.to_string(), self.travel_minutes_per_km.source),
        );
        map.insert(
            "default_geofence_radius_m".to_string(),
            (
                format!("{} m", self.default_geofence_radius_m.value),
                self.default_geofence_radius_m.source,
            ),
        );
        map.insert(
            "audit_timeout_ms".to_string(),
            (format!("{} ms", self.audit_timeout_ms.value), self.audit_timeout_ms.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    mileage_rate_per_km: Option<f64>,
    mileage_threshold_m: Option<f64>,
    default_max_distance_m: Option<f64>,
    default_limit: Option<usize>,
    default_nearby_radius_m: Option<f64>,
    travel_minutes_per_km: Option<f64>,
    default_geofence_radius_m: Option<f64>,
    audit_timeout_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub mileage_rate_per_km: Option<f64>,
    pub mileage_threshold_m: Option<f64>,
    pub default_geofence_radius_m: Option<f64>,
}

/// Read a numeric env override, applying the same check as the file layer
fn env_f64(key: &str, check: fn(&str, f64) -> Result<f64>) -> Option<f64> {
    let raw = env::var(key).ok()?;
    let parsed = raw.parse::<f64>().map_err(|e| FieldnavError::ConfigInvalid {
        key: key.to_string(),
        reason: e.to_string(),
    });
    match parsed.and_then(|value| check(key, value)) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {} value '{}': {}", key, raw, e);
            None
        }
    }
}

fn non_negative(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FieldnavError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("expected a non-negative number, got {}", value),
        })
    }
}

fn positive_millis(key: &str, value: u64) -> Result<u64> {
    if value > 0 {
        Ok(value)
    } else {
        Err(FieldnavError::ConfigInvalid {
            key: key.to_string(),
            reason: "expected a positive number of milliseconds".to_string(),
        })
    }
}

fn positive(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FieldnavError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("expected a positive number, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.mileage_rate_per_km.value, 0.50);
        assert_eq!(config.mileage_rate_per_km.source, ConfigSource::Default);
        assert_eq!(config.mileage_threshold_m.value, 100.0);
        assert_eq!(config.default_limit.value, 3);
        assert_eq!(config.audit_timeout_ms.value, 3_000);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
mileage_rate_per_km = 0.75
mileage_threshold_m = 250.0
default_limit = 5
audit_timeout_ms = 1500
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.mileage_rate_per_km.value, 0.75);
        assert_eq!(config.mileage_rate_per_km.source, ConfigSource::File);
        assert_eq!(config.mileage_threshold_m.value, 250.0);
        assert_eq!(config.default_limit.value, 5);
        assert_eq!(config.default_nearby_radius_m.source, ConfigSource::Default);

        let resolved = config.to_dispatch_config();
        assert_eq!(resolved.audit_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_file_rejects_zero_limit() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_limit = 0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(FieldnavError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config
            .update_from_cli(CliConfigOverrides {
                mileage_rate_per_km: Some(1.0),
                mileage_threshold_m: None,
                default_geofence_radius_m: Some(250.0),
            })
            .unwrap();

        assert_eq!(config.mileage_rate_per_km.value, 1.0);
        assert_eq!(config.mileage_rate_per_km.source, ConfigSource::Cli);
        assert_eq!(config.default_geofence_radius_m.value, 250.0);
        assert_eq!(config.mileage_threshold_m.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_rejects_negative_values() {
        let mut config = LayeredConfig::with_defaults();

        let err = config
            .update_from_cli(CliConfigOverrides {
                default_geofence_radius_m: Some(-10.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, FieldnavError::ConfigInvalid { ref key, .. } if key == "default_geofence_radius_m"));
        assert_eq!(config.default_geofence_radius_m.value, 100.0);
        assert_eq!(config.default_geofence_radius_m.source, ConfigSource::Default);

        let err = config
            .update_from_cli(CliConfigOverrides {
                mileage_rate_per_km: Some(-0.5),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, FieldnavError::ConfigInvalid { .. }));

        // A zero rate switches mileage reimbursement off and is allowed
        config
            .update_from_cli(CliConfigOverrides {
                mileage_rate_per_km: Some(0.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.mileage_rate_per_km.value, 0.0);
    }

    #[test]
    fn test_file_rejects_zero_audit_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "audit_timeout_ms = 0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(FieldnavError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();

        let (rate, source) = &map["mileage_rate_per_km"];
        assert_eq!(rate, "0.50");
        assert_eq!(*source, ConfigSource::Default);
        assert!(map.contains_key("audit_timeout_ms"));
    }
}
