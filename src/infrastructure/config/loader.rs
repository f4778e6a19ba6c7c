use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local directory holding configuration files
pub const CONFIG_DIR: &str = ".flowshelf";

/// Prefix for environment overrides, e.g. `FLOWSHELF_STORE__URL`
pub const ENV_PREFIX: &str = "FLOWSHELF_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Model roster cannot be empty")]
    EmptyModelRoster,

    #[error("Model name at position {0} is blank")]
    BlankModelName(usize),

    #[error("Invalid {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid store url: {0}. Must start with http:// or https://")]
    InvalidStoreUrl(String),

    #[error("Store table name cannot be empty")]
    EmptyTable,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .flowshelf/config.yaml (project config, created by init)
    /// 3. .flowshelf/local.yaml (project local overrides, optional)
    /// 4. Environment variables (FLOWSHELF_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Same as [`ConfigLoader::load`], rooted at `root` instead of the working directory
    pub fn load_from_dir(root: &Path) -> Result<Config> {
        let dir = root.join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Default location of the project config file
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join("config.yaml")
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(&Config::default())
            .context("Failed to serialize default configuration")?;
        std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Generation roster
        if config.generation.models.is_empty() {
            return Err(ConfigError::EmptyModelRoster);
        }
        if let Some(position) = config
            .generation
            .models
            .iter()
            .position(|m| m.trim().is_empty())
        {
            return Err(ConfigError::BlankModelName(position));
        }
        if config.generation.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("generation.timeout_secs"));
        }
        if config.generation.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "generation.base_url cannot be empty".to_string(),
            ));
        }

        // Record store
        if config.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("store.timeout_secs"));
        }
        if config.store.table.trim().is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if let Some(url) = &config.store.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidStoreUrl(url.clone()));
            }
        }

        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
