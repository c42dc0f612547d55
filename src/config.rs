//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::HttpClientConfig;
use crate::board::BoardOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Activities service connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Board behavior
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_allow_removal")]
    pub allow_removal: bool,

    #[serde(default = "default_message_timeout")]
    pub message_timeout_ms: u64,
}

fn default_allow_removal() -> bool {
    true
}

fn default_message_timeout() -> u64 {
    5000 // 5 seconds
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            allow_removal: default_allow_removal(),
            message_timeout_ms: default_message_timeout(),
        }
    }
}

impl BoardConfig {
    pub fn options(&self) -> BoardOptions {
        BoardOptions {
            allow_removal: self.allow_removal,
            message_timeout: Duration::from_millis(self.message_timeout_ms),
        }
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
    "warn".to_string()
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let problems = config.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            problems,
        })
    }

    /// Files searched by [`Config::load_default`], in order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("activity-board").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/activity-board/config.toml"));
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first of `paths` that exists and parses, then apply
    /// environment overrides. Files that exist but fail to load are
    /// skipped and reported in [`LoadedConfig::problems`].
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        Self::load_first_with(paths, |key| std::env::var(key).ok())
    }

    fn load_first_with(
        paths: &[PathBuf],
        var: impl Fn(&str) -> Option<String>,
    ) -> LoadedConfig {
        let mut problems = Vec::new();
        let mut loaded = None;

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(config) => {
                    loaded = Some((config, path.clone()));
                    break;
                }
                Err(e) => problems.push(e),
            }
        }

        let (mut config, source) = match loaded {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        };
        problems.extend(config.apply_overrides(var));

        LoadedConfig {
            config,
            source,
            problems,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Returns the overrides that were set but could not be used
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Vec<ConfigError> {
        let mut rejected = Vec::new();

        if let Some(url) = var("ACTIVITY_BOARD_URL") {
            self.server.base_url = url;
        }

        if let Some(allow) = var("ACTIVITY_BOARD_ALLOW_REMOVAL") {
            match allow.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.board.allow_removal = true,
                "0" | "false" | "no" => self.board.allow_removal = false,
                _ => rejected.push(ConfigError::InvalidOverride {
                    key: "ACTIVITY_BOARD_ALLOW_REMOVAL",
                    value: allow,
                }),
            }
        }
        if let Some(timeout) = var("ACTIVITY_BOARD_MESSAGE_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.board.message_timeout_ms = ms,
                Err(_) => rejected.push(ConfigError::InvalidOverride {
                    key: "ACTIVITY_BOARD_MESSAGE_TIMEOUT_MS",
                    value: timeout,
                }),
            }
        }

        if let Some(level) = var("ACTIVITY_BOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ACTIVITY_BOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        rejected
    }
}

/// A loaded configuration plus what went wrong on the way.
///
/// Loading runs before logging is set up, so problems are kept here and
/// reported with [`LoadedConfig::log_problems`] once it is.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    /// Files and overrides that were skipped
    pub problems: Vec<ConfigError>,
}

impl LoadedConfig {
    pub fn log_problems(&self) {
        for problem in &self.problems {
            tracing::warn!("{}", problem);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
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

    #[error("Ignoring {key}={value}")]
    InvalidOverride { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Activity Board Configuration
#
# Environment variables override these settings:
# - ACTIVITY_BOARD_URL
# - ACTIVITY_BOARD_ALLOW_REMOVAL
# - ACTIVITY_BOARD_MESSAGE_TIMEOUT_MS
# - ACTIVITY_BOARD_LOG_LEVEL
# - ACTIVITY_BOARD_LOG_FORMAT

[server]
# Base URL of the activities service
base_url = "http://localhost:8000"

# Request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 30

[board]
# Offer removal of participants
allow_removal = true

# How long success and error messages stay visible (ms)
message_timeout_ms = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
