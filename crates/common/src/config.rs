//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DenoiseError, DenoiseResult};
use crate::level::SuppressionLevel;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default denoising settings.
    pub defaults: DenoiseDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default denoising parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseDefaults {
    /// Default suppression aggressiveness.
    pub level: SuppressionLevel,

    /// Suffix appended to the input stem to name the output file.
    pub output_suffix: String,

    /// Number of files processed concurrently in batch mode.
    pub jobs: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "nsclean=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for DenoiseDefaults {
    fn default() -> Self {
        Self {
            level: SuppressionLevel::Moderate,
            output_suffix: "_out".to_string(),
            jobs: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> DenoiseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> DenoiseResult<()> {
        if self.defaults.output_suffix.is_empty() {
            return Err(DenoiseError::Config {
                message: "output_suffix must not be empty (it would overwrite the input)"
                    .to_string(),
            });
        }
        if self.defaults.jobs == 0 {
            return Err(DenoiseError::Config {
                message: "jobs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("nsclean").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"defaults": {"level": "high"}}"#).unwrap();
        assert_eq!(config.defaults.level, SuppressionLevel::High);
        assert_eq!(config.defaults.output_suffix, "_out");
        assert_eq!(config.defaults.jobs, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_rejects_empty_suffix() {
        let dir = std::env::temp_dir().join("nsclean_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"defaults": {"output_suffix": ""}}"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, DenoiseError::Config { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_from_invalid_json() {
        let dir = std::env::temp_dir().join("nsclean_test_config_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(DenoiseError::Json(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
