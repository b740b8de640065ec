//! Configuration for the loadwatch binary.
//!
//! Loaded from `.loadwatch.yml` or `~/.config/loadwatch/loadwatch.yml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadwatchError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub log_level: String,
    pub overlay: OverlayConfig,
    pub simulate: SimulateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            overlay: OverlayConfig::default(),
            simulate: SimulateConfig::default(),
        }
    }
}

/// Overlay transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    Fade,
    Zoom,
    Slide,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OverlayConfig {
    pub animation: Animation,
    pub duration_ms: u64,
    pub message: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            animation: Animation::Fade,
            duration_ms: 200,
            message: "Loading...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SimulateConfig {
    pub tasks: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub failure_rate: f64,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            tasks: 4,
            min_delay_ms: 50,
            max_delay_ms: 500,
            failure_rate: 0.25,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .loadwatch.yml in current directory
    /// 3. ~/.config/loadwatch/loadwatch.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .map_err(|e| LoadwatchError::Config(format!("Failed to load config from {}: {}", path.display(), e)));
        }

        let project_config = PathBuf::from(".loadwatch.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load {}: {}", project_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("loadwatch").join("loadwatch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.simulate.tasks == 0 {
            return Err(LoadwatchError::InvalidConfig("simulate.tasks must be > 0".to_string()));
        }
        if self.simulate.min_delay_ms > self.simulate.max_delay_ms {
            return Err(LoadwatchError::InvalidConfig(
                "simulate.min-delay-ms must not exceed simulate.max-delay-ms".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.simulate.failure_rate) {
            return Err(LoadwatchError::InvalidConfig(
                "simulate.failure-rate must be within 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.overlay.animation, Animation::Fade);
        assert_eq!(config.overlay.duration_ms, 200);
        assert_eq!(config.simulate.tasks, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_partial_file() {
        let file = write_config("overlay:\n  animation: zoom\nsimulate:\n  tasks: 9\n");
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.overlay.animation, Animation::Zoom);
        assert_eq!(config.overlay.message, "Loading...");
        assert_eq!(config.simulate.tasks, 9);
        assert_eq!(config.simulate.max_delay_ms, 500);
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let path = PathBuf::from("/nonexistent/loadwatch.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, LoadwatchError::Config(_)));
    }

    #[test]
    fn test_unknown_animation_rejected() {
        let file = write_config("overlay:\n  animation: spin\n");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadwatchError::Yaml(_)));
    }

    #[test]
    fn test_validate_rejects_zero_tasks() {
        let mut config = Config::default();
        config.simulate.tasks = 0;
        assert!(matches!(config.validate(), Err(LoadwatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_delays() {
        let mut config = Config::default();
        config.simulate.min_delay_ms = 900;
        config.simulate.max_delay_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_failure_rate() {
        let mut config = Config::default();
        config.simulate.failure_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_uses_kebab_case_keys() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("log-level: info"));
        assert!(yaml.contains("duration-ms: 200"));
        assert!(yaml.contains("failure-rate: 0.25"));
    }
}
