//! # Spawner Configuration
//!
//! Runtime settings for the placement spawner. Placement distance and the
//! spawned entity's properties are fixed; only logging and the teardown
//! policy can be changed.
//!
//! ```toml
//! log_level = "debug"
//!
//! [teardown]
//! delete_on_teardown = true
//! ```

use serde::{Serialize, Deserialize};

use crate::config::Config;

/// What happens to the spawned entity when the script terminates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeardownPolicy {
    /// Delete the spawned entity on termination. Off by default so the test
    /// entity stays in the world for inspection after the script ends.
    pub delete_on_teardown: bool,
}

impl TeardownPolicy {
    /// Leave the entity in the world
    pub const fn keep() -> Self {
        Self { delete_on_teardown: false }
    }

    /// Delete the entity on termination
    pub const fn delete() -> Self {
        Self { delete_on_teardown: true }
    }
}

/// Top-level spawner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Teardown behaviour
    pub teardown: TeardownPolicy,
}

impl SpawnerConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            teardown: TeardownPolicy::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set teardown policy
    pub fn with_teardown(mut self, teardown: TeardownPolicy) -> Self {
        self.teardown = teardown;
        self
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SpawnerConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ConfigFormat};
    use std::path::Path;

    #[test]
    fn test_defaults_keep_entity() {
        let config = SpawnerConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.teardown.delete_on_teardown);
    }

    #[test]
    fn test_parse_toml() {
        let text = "log_level = \"debug\"\n\n[teardown]\ndelete_on_teardown = true\n";
        let config = SpawnerConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.teardown, TeardownPolicy::delete());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SpawnerConfig::from_str_with_format("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, SpawnerConfig::default());
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let file_name = format!("viewpoint_spawner_{}.ron", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let config = SpawnerConfig::new()
            .with_log_level("trace")
            .with_teardown(TeardownPolicy::delete());

        config.save_to_file(&path).unwrap();
        let loaded = SpawnerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SpawnerConfig::load_from_file(Path::new("spawner.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/spawner.toml");
        let err = SpawnerConfig::load_from_file(path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
