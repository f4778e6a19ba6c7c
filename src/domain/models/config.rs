use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Flowshelf
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Static catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Remote record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Draft generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Session supplied by the identity provider
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Static catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogConfig {
    /// YAML file replacing the catalog compiled into the binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Remote record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co` (can also be set via SUPABASE_URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public anon key (can also be set via SUPABASE_ANON_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,

    /// Table holding user-authored workflows
    #[serde(default = "default_table")]
    pub table: String,

    /// Timeout for each store request in seconds
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "workflows".to_string()
}

const fn default_store_timeout() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: default_table(),
            timeout_secs: default_store_timeout(),
        }
    }
}

impl StoreConfig {
    /// Get the project URL from config or environment.
    pub fn get_url(&self) -> Option<String> {
        self.url.clone().or_else(|| std::env::var("SUPABASE_URL").ok())
    }

    /// Get the anon key from config or environment.
    pub fn get_anon_key(&self) -> Option<String> {
        self.anon_key
            .clone()
            .or_else(|| std::env::var("SUPABASE_ANON_KEY").ok())
    }
}

/// Draft generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// API key (can also be set via GEMINI_API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL for the API (for testing/proxies)
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    /// Models tried in order until one returns a usable draft
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Timeout for each model attempt in seconds
    #[serde(default = "default_attempt_timeout")]
    pub timeout_secs: u64,
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
        "gemini-1.5-pro".to_string(),
    ]
}

const fn default_attempt_timeout() -> u64 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generation_base_url(),
            models: default_models(),
            timeout_secs: default_attempt_timeout(),
        }
    }
}

impl GenerationConfig {
    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Session supplied by the identity provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Signed-in user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Access token for the record store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Rotation for log files: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
