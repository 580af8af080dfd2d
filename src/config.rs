//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::gemini::GeminiConfig as GeminiClientConfig;
use crate::session::Watchlist;
use crate::signal::{VerifierConfig, WatchStatus, WatchTopic};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub watchlist: WatchlistConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key; usually supplied through the environment instead
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Unset keeps the HTTP client's default (no timeout)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_url(),
            model: default_model(),
            temperature: default_temperature(),
            request_timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Settings for the HTTP client
    pub fn client_config(&self) -> GeminiClientConfig {
        GeminiClientConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }

    /// Settings for the verification client
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            temperature: self.temperature,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initial watchlist contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistConfig {
    #[serde(default)]
    pub topics: Vec<SeedTopic>,
}

/// A topic placed on the watchlist at startup
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTopic {
    pub topic: String,
    #[serde(default)]
    pub status: WatchStatus,
}

impl WatchlistConfig {
    /// Build the starting watchlist, skipping blank topics
    pub fn build(&self) -> Watchlist {
        Watchlist::seeded(
            self.topics
                .iter()
                .filter(|seed| !seed.topic.trim().is_empty())
                .map(|seed| WatchTopic::new(seed.topic.trim(), seed.status))
                .collect(),
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("livesignal").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/livesignal/config.toml"));
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// Load the explicit file, else the first existing default location,
    /// else defaults with environment overrides
    ///
    /// Returns the file that was used. A file that exists but cannot be
    /// read or parsed is an error, not a silent fallback.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::resolve_from(explicit, &Self::default_paths())
    }

    fn resolve_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| candidates.iter().find(|p| p.exists()).cloned());

        match path {
            Some(path) => Ok((Self::load_with_env(&path)?, Some(path))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API key: most specific name wins
        for var in ["LIVESIGNAL_API_KEY", "GEMINI_API_KEY", "API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.gemini.api_key = Some(key);
                    break;
                }
            }
        }

        // Gemini overrides
        if let Ok(model) = std::env::var("LIVESIGNAL_MODEL") {
            self.gemini.model = model;
        }
        if let Ok(url) = std::env::var("LIVESIGNAL_GEMINI_URL") {
            self.gemini.base_url = url;
        }

        // API overrides
        if let Ok(host) = std::env::var("LIVESIGNAL_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("LIVESIGNAL_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("LIVESIGNAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LIVESIGNAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# LiveSignal Configuration
#
# Environment variables override these settings:
# - LIVESIGNAL_API_KEY (or GEMINI_API_KEY / API_KEY)
# - LIVESIGNAL_MODEL
# - LIVESIGNAL_GEMINI_URL
# - LIVESIGNAL_API_HOST
# - LIVESIGNAL_API_PORT
# - LIVESIGNAL_LOG_LEVEL
# - LIVESIGNAL_LOG_FORMAT

[gemini]
# API key (prefer the environment)
# api_key = ""

# Gemini REST endpoint
base_url = "https://generativelanguage.googleapis.com"

# Model used for verification and trending topics
model = "gemini-3-flash-preview"

# Sampling temperature for verification (low favours factual consistency)
temperature = 0.2

# Optional request timeout in seconds (unset = no timeout)
# request_timeout_secs = 120

[api]
# Dashboard API host
host = "127.0.0.1"

# Dashboard API port
port = 8090

# Allowed CORS origins (empty = permissive)
cors_origins = []

# Topics on the watchlist at startup
[[watchlist.topics]]
topic = "AI Regulation Act 2025"
status = "monitoring"

[[watchlist.topics]]
topic = "Sustainable Aviation Fuel breakthroughs"
status = "idle"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
