//! Configuration for rolling log files
//!
//! This module provides the options a rolling file sink is configured with.
//! The checkpoint calculator itself needs nothing but a granularity; the
//! remaining settings are carried for the sink that consumes it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::rolling::{Granularity, RollingFileNamer};

/// Default number of rolled files to keep
pub const DEFAULT_RETAINED_FILE_COUNT_LIMIT: usize = 31;

/// Default size at which a single file stops growing (1 GiB)
pub const DEFAULT_FILE_SIZE_LIMIT_BYTES: u64 = 1024 * 1024 * 1024;

/// Configuration options for a rolling log file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct RollingConfig {
    // Naming
    /// Base path of the log file, e.g. `logs/app-.log`
    pub path: PathBuf,
    /// How often a new file begins
    pub granularity: Granularity,

    // Retention policy
    /// Maximum number of rolled files to keep, `None` keeps all
    #[serde(with = "unlimited")]
    pub retained_file_count_limit: Option<usize>,
    /// Maximum age of rolled files to keep, `None` keeps all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_file_time_limit: Option<Duration>,

    // Size limits
    /// Maximum size of a single file in bytes, `None` for unlimited
    #[serde(with = "unlimited")]
    pub file_size_limit_bytes: Option<u64>,
    /// Start a sequenced file within the same period when the size limit is hit
    pub roll_on_file_size_limit: bool,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("log.txt"),
            granularity: Granularity::Unbounded,

            retained_file_count_limit: Some(DEFAULT_RETAINED_FILE_COUNT_LIMIT),
            retained_file_time_limit: None,

            file_size_limit_bytes: Some(DEFAULT_FILE_SIZE_LIMIT_BYTES),
            roll_on_file_size_limit: false,
        }
    }
}

impl RollingConfig {
    /// Create a new rolling configuration for `path` with default values
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Set the rotation granularity
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the maximum number of rolled files to keep
    pub fn with_retained_file_count_limit(mut self, limit: Option<usize>) -> Self {
        self.retained_file_count_limit = limit;
        self
    }

    /// Set the maximum age of rolled files to keep
    pub fn with_retained_file_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.retained_file_time_limit = limit;
        self
    }

    /// Set the maximum size of a single file
    pub fn with_file_size_limit_bytes(mut self, limit: Option<u64>) -> Self {
        self.file_size_limit_bytes = limit;
        self
    }

    /// Set whether to roll to a sequenced file when the size limit is hit
    pub fn with_roll_on_file_size_limit(mut self, roll: bool) -> Self {
        self.roll_on_file_size_limit = roll;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let result = self.check();

        #[cfg(feature = "tracing")]
        if let Err(ref err) = result {
            tracing::debug!(path = ?self.path, error = %err, "rolling configuration rejected");
        }

        result
    }

    fn check(&self) -> Result<()> {
        if self.path.file_name().is_none() {
            return Err(Error::config(format!("Log path must name a file: {:?}", self.path)));
        }

        if self.retained_file_count_limit == Some(0) {
            return Err(Error::config("Retained file count limit must be at least 1"));
        }

        if self.retained_file_time_limit == Some(Duration::ZERO) {
            return Err(Error::config("Retained file time limit must be positive"));
        }

        if self.file_size_limit_bytes == Some(0) {
            return Err(Error::config("File size limit must be at least 1 byte"));
        }

        if self.roll_on_file_size_limit && self.file_size_limit_bytes.is_none() {
            return Err(Error::config("Rolling on file size limit requires a file size limit"));
        }

        Ok(())
    }

    /// Build the file namer for this configuration
    pub fn namer(&self) -> Result<RollingFileNamer> {
        self.validate()?;
        RollingFileNamer::new(&self.path, self.granularity)
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create a human-readable string representation of the configuration
    pub fn to_string_pretty(&self) -> String {
        let mut result = String::new();

        result.push_str("=== Rolling File Configuration ===\n\n");

        result.push_str("Naming:\n");
        result.push_str(&format!("  Path: {:?}\n", self.path));
        result.push_str(&format!("  Granularity: {}\n", self.granularity));

        result.push_str("\nRetention Policy:\n");
        match self.retained_file_count_limit {
            Some(limit) => result.push_str(&format!("  Retained File Count: {}\n", limit)),
            None => result.push_str("  Retained File Count: unlimited\n"),
        }
        match self.retained_file_time_limit {
            Some(limit) => {
                result.push_str(&format!("  Retained File Age: {} s\n", limit.as_secs()))
            }
            None => result.push_str("  Retained File Age: unlimited\n"),
        }

        result.push_str("\nSize Limits:\n");
        match self.file_size_limit_bytes {
            Some(limit) => result.push_str(&format!("  File Size Limit: {} bytes\n", limit)),
            None => result.push_str("  File Size Limit: unlimited\n"),
        }
        result.push_str(&format!("  Roll On Size Limit: {}\n", self.roll_on_file_size_limit));

        result
    }

    /// Load configuration from a TOML file
    #[cfg(feature = "toml")]
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        use std::fs::read_to_string;

        let content = read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    #[cfg(feature = "toml")]
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::fs::write;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize to TOML: {}", e)))?;

        write(path, content)?;

        Ok(())
    }
}

/// Serializes an optional limit with `None` spelled out as `"unlimited"`,
/// so formats that drop missing values cannot bring the default back.
mod unlimited {
    use serde::de::{self, DeserializeOwned, Deserializer};
    use serde::{Deserialize, Serialize, Serializer};

    const UNLIMITED: &str = "unlimited";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Limit<T> {
        Value(T),
        Word(String),
    }

    pub fn serialize<T, S>(limit: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match limit {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_str(UNLIMITED),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        match Option::<Limit<T>>::deserialize(deserializer)? {
            Some(Limit::Value(value)) => Ok(Some(value)),
            Some(Limit::Word(word)) if word.eq_ignore_ascii_case(UNLIMITED) => Ok(None),
            Some(Limit::Word(word)) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&word),
                &"a number or \"unlimited\"",
            )),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RollingConfig::default();

        assert_eq!(config.path, PathBuf::from("log.txt"));
        assert_eq!(config.granularity, Granularity::Unbounded);
        assert_eq!(config.retained_file_count_limit, Some(31));
        assert_eq!(config.retained_file_time_limit, None);
        assert_eq!(config.file_size_limit_bytes, Some(1024 * 1024 * 1024));
        assert!(!config.roll_on_file_size_limit);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RollingConfig::new("logs/app-.log")
            .with_granularity(Granularity::Hour)
            .with_retained_file_count_limit(None)
            .with_retained_file_time_limit(Some(Duration::from_secs(7 * 24 * 3600)))
            .with_file_size_limit_bytes(Some(10 * 1024 * 1024))
            .with_roll_on_file_size_limit(true);

        assert_eq!(config.path, PathBuf::from("logs/app-.log"));
        assert_eq!(config.granularity, Granularity::Hour);
        assert_eq!(config.retained_file_count_limit, None);
        assert_eq!(config.retained_file_time_limit, Some(Duration::from_secs(604800)));
        assert_eq!(config.file_size_limit_bytes, Some(10 * 1024 * 1024));
        assert!(config.roll_on_file_size_limit);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let invalid_configs = vec![
            RollingConfig::new("logs/.."), // No file name
            RollingConfig::new("app.log").with_retained_file_count_limit(Some(0)),
            RollingConfig::new("app.log").with_retained_file_time_limit(Some(Duration::ZERO)),
            RollingConfig::new("app.log").with_file_size_limit_bytes(Some(0)),
            RollingConfig::new("app.log")
                .with_file_size_limit_bytes(None)
                .with_roll_on_file_size_limit(true),
        ];

        for config in invalid_configs {
            let err = config.validate().unwrap_err();
            assert!(err.is_config_error());
        }
    }

    #[test]
    fn test_config_namer() {
        let config = RollingConfig::new("logs/app-.log").with_granularity(Granularity::Day);
        let namer = config.namer().unwrap();
        assert_eq!(namer.granularity(), Granularity::Day);
        assert_eq!(namer.search_pattern(), "app-*.log");

        assert!(RollingConfig::new("logs/..").namer().is_err());
    }

    #[test]
    fn test_config_json() {
        let config = RollingConfig::new("logs/app-.log").with_granularity(Granularity::Minute);
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"minute\""));
        assert_eq!(RollingConfig::from_json_str(&json).unwrap(), config);

        let partial =
            RollingConfig::from_json_str(r#"{"path": "x.log", "granularity": "day"}"#).unwrap();
        assert_eq!(partial.granularity, Granularity::Day);
        assert_eq!(partial.retained_file_count_limit, Some(31));

        assert!(RollingConfig::from_json_str(r#"{"granularity": "week"}"#).is_err());
        assert!(RollingConfig::from_json_str(r#"{"retained_file_count_limit": 0}"#)
            .unwrap_err()
            .is_config_error());
    }

    #[test]
    fn test_config_json_unlimited() {
        let config = RollingConfig::new("logs/app-.log")
            .with_retained_file_count_limit(None)
            .with_file_size_limit_bytes(None);
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"retained_file_count_limit\": \"unlimited\""));
        assert!(json.contains("\"file_size_limit_bytes\": \"unlimited\""));
        assert_eq!(RollingConfig::from_json_str(&json).unwrap(), config);

        let parsed = RollingConfig::from_json_str(
            r#"{"retained_file_count_limit": null, "file_size_limit_bytes": 42}"#,
        )
        .unwrap();
        assert_eq!(parsed.retained_file_count_limit, None);
        assert_eq!(parsed.file_size_limit_bytes, Some(42));

        assert!(RollingConfig::from_json_str(r#"{"file_size_limit_bytes": "lots"}"#).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rolling.toml");

        let unlimited = RollingConfig::new("logs/app-.log")
            .with_granularity(Granularity::Hour)
            .with_retained_file_count_limit(None)
            .with_file_size_limit_bytes(None);
        unlimited.to_toml_file(&file).unwrap();
        assert_eq!(RollingConfig::from_toml_file(&file).unwrap(), unlimited);

        let limited = RollingConfig::new("logs/app-.log")
            .with_retained_file_count_limit(Some(7))
            .with_retained_file_time_limit(Some(Duration::from_secs(3600)))
            .with_file_size_limit_bytes(Some(1024))
            .with_roll_on_file_size_limit(true);
        limited.to_toml_file(&file).unwrap();
        assert_eq!(RollingConfig::from_toml_file(&file).unwrap(), limited);
    }

    #[test]
    fn test_config_pretty_string() {
        let config = RollingConfig::new("logs/app-.log").with_granularity(Granularity::Day);
        let pretty = config.to_string_pretty();

        assert!(pretty.contains("Naming:"));
        assert!(pretty.contains("Retention Policy:"));
        assert!(pretty.contains("Size Limits:"));
        assert!(pretty.contains("Granularity: day"));
        assert!(pretty.contains("Retained File Count: 31"));
        assert!(pretty.contains("Retained File Age: unlimited"));
    }
}
