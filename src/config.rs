//! Engine settings, loadable from TOML.
//!
//! Every knob has a default matching the shipped map behavior, so an empty
//! file (or no file at all) configures a working engine. Hosts override
//! individual keys:
//!
//! ```toml
//! [cluster]
//! distance_px = 60.0
//!
//! [style]
//! label_max_resolution = 25.0
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::ClusterConfig;
use crate::style::StyleSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub style: StyleSettings,
}

/// Parses a TOML document. Missing sections and keys take defaults.
impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(input)?)
    }
}

impl EngineConfig {
    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = contents.parse()?;
        info!("loaded engine config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn empty_document_yields_defaults() {
        let config: EngineConfig = "".parse().unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.cluster.distance_px, 50.0);
        assert_eq!(config.cluster.min_distance_px, 25.0);
        assert_eq!(config.style.label_max_resolution, 50.0);
        assert_eq!(config.style.label_truncate_chars, 8);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config = EngineConfig::from_str(
            r#"
            [cluster]
            distance_px = 60.0

            [style]
            label_truncate_chars = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.cluster.distance_px, 60.0);
        assert_eq!(config.cluster.min_distance_px, 25.0);
        assert_eq!(config.style.label_truncate_chars, 12);
        assert_eq!(config.style.label_max_resolution, 50.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_str("[cluster\ndistance_px = 60.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        let err = EngineConfig::from_str("[cluster]\ndistance_px = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cluster]\nmin_distance_px = 30.0").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cluster.min_distance_px, 30.0);
        assert_eq!(config.cluster.distance_px, 50.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = EngineConfig {
            cluster: ClusterConfig {
                distance_px: 45.0,
                min_distance_px: 20.0,
                resolution_epsilon: 1e-6,
            },
            style: StyleSettings {
                label_max_resolution: 30.0,
                label_truncate_chars: 10,
            },
        };

        let encoded = toml::to_string(&config).unwrap();
        let decoded = EngineConfig::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
