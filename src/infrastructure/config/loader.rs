use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;

use crate::domain::errors::ConfigError;
use crate::domain::models::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".turnwatch";

/// Prefix for environment overrides, nested keys split on `__`.
pub const ENV_PREFIX: &str = "TURNWATCH_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .turnwatch/config.yaml (project config)
    /// 3. .turnwatch/local.yaml (project local overrides, optional)
    /// 4. Environment variables (TURNWATCH_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same precedence as [`load`](Self::load), rooted at `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, with environment overrides on top
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config.monitor.validate()?;

        let logging = &config.logging;
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(logging.level.clone()));
        }
        if !VALID_LOG_FORMATS.contains(&logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(logging.format.clone()));
        }
        if !VALID_ROTATIONS.contains(&logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(logging.rotation.clone()));
        }

        Ok(())
    }
}
