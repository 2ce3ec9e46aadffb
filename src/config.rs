//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientConfig;
use crate::logging::LogFormat;
use crate::models::ProductionThresholds;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub alerts: AlertsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/smart-bee-house/api".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Refresh coordinator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Period of the automatic refresh
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,

    /// Hives above this honey quantity are "high production"
    #[serde(default = "default_high_threshold")]
    pub high_production_threshold: f64,

    /// Hives below this honey quantity are "low production"
    #[serde(default = "default_low_threshold")]
    pub low_production_threshold: f64,

    /// Number of planned visits requested for the recent-visits list
    #[serde(default = "default_recent_visits_limit")]
    pub recent_visits_limit: usize,

    /// Maximum rows rendered in each production table
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,

    /// Period of the connectivity probe
    #[serde(default = "default_probe_interval")]
    pub probe_interval_ms: u64,
}

fn default_refresh_interval() -> u64 {
    30_000 // 30 seconds
}

fn default_high_threshold() -> f64 {
    5000.0
}

fn default_low_threshold() -> f64 {
    1000.0
}

fn default_recent_visits_limit() -> usize {
    5
}

fn default_table_rows() -> usize {
    5
}

fn default_probe_interval() -> u64 {
    10_000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
            high_production_threshold: default_high_threshold(),
            low_production_threshold: default_low_threshold(),
            recent_visits_limit: default_recent_visits_limit(),
            table_rows: default_table_rows(),
            probe_interval_ms: default_probe_interval(),
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn thresholds(&self) -> ProductionThresholds {
        ProductionThresholds {
            high: self.high_production_threshold,
            low: self.low_production_threshold,
        }
    }
}

/// Alert stream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_alerts_enabled")]
    pub enabled: bool,

    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// Alerts kept in memory; older ones are evicted first
    #[serde(default = "default_max_retained")]
    pub max_retained: usize,

    /// Attempt system notifications for incoming alerts
    #[serde(default = "default_notifications")]
    pub notifications: bool,

    #[serde(default = "default_reconnect_initial")]
    pub reconnect_initial_ms: u64,

    #[serde(default = "default_reconnect_max")]
    pub reconnect_max_ms: u64,
}

fn default_alerts_enabled() -> bool {
    true
}

fn default_ws_url() -> String {
    "ws://localhost:8080/smart-bee-house/ws/alerts".to_string()
}

fn default_max_retained() -> usize {
    100
}

fn default_notifications() -> bool {
    true
}

fn default_reconnect_initial() -> u64 {
    1_000
}

fn default_reconnect_max() -> u64 {
    30_000
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: default_alerts_enabled(),
            ws_url: default_ws_url(),
            max_retained: default_max_retained(),
            notifications: default_notifications(),
            reconnect_initial_ms: default_reconnect_initial(),
            reconnect_max_ms: default_reconnect_max(),
        }
    }
}

impl AlertsConfig {
    pub fn reconnect_initial(&self) -> Duration {
        Duration::from_millis(self.reconnect_initial_ms)
    }

    pub fn reconnect_max(&self) -> Duration {
        Duration::from_millis(self.reconnect_max_ms)
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

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    ///
    /// Overrides that fail validation are discarded in favour of the defaults.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Ignoring environment overrides: {}", e);
                Config::default()
            }
        }
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from `BEEHOUSE_CONFIG`, the default locations, or the environment
    pub fn load_default() -> Self {
        let explicit = std::env::var("BEEHOUSE_CONFIG").ok().map(PathBuf::from);
        let config_paths = [
            explicit,
            dirs::config_dir().map(|p| p.join("beehouse").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject values the coordinator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.refresh_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.dashboard.probe_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.probe_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.dashboard.low_production_threshold > self.dashboard.high_production_threshold {
            return Err(ConfigError::Invalid(format!(
                "dashboard.low_production_threshold ({}) exceeds high_production_threshold ({})",
                self.dashboard.low_production_threshold, self.dashboard.high_production_threshold
            )));
        }
        if self.alerts.max_retained == 0 {
            return Err(ConfigError::Invalid(
                "alerts.max_retained must be greater than 0".to_string(),
            ));
        }
        if let Err(e) = self.logging.format.parse::<LogFormat>() {
            return Err(ConfigError::Invalid(format!("logging.format: {}", e)));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(url) = std::env::var("BEEHOUSE_API_URL") {
            self.api.base_url = url;
        }

        // Dashboard overrides
        if let Ok(interval) = std::env::var("BEEHOUSE_REFRESH_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.dashboard.refresh_interval_ms = ms;
            }
        }

        // Alert stream overrides
        if let Ok(url) = std::env::var("BEEHOUSE_WS_URL") {
            self.alerts.ws_url = url;
        }
        if let Ok(enabled) = std::env::var("BEEHOUSE_ALERTS_ENABLED") {
            if let Ok(flag) = enabled.parse() {
                self.alerts.enabled = flag;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("BEEHOUSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BEEHOUSE_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Smart Bee House dashboard configuration
#
# Environment variables override these settings:
# - BEEHOUSE_CONFIG (path of this file)
# - BEEHOUSE_API_URL
# - BEEHOUSE_REFRESH_INTERVAL_MS
# - BEEHOUSE_WS_URL
# - BEEHOUSE_ALERTS_ENABLED
# - BEEHOUSE_LOG_LEVEL
# - BEEHOUSE_LOG_FORMAT

[api]
# Base URL of the REST API
base_url = "http://localhost:8080/smart-bee-house/api"

# Request timeout (ms); a timeout fails the section like any other error
request_timeout_ms = 10000

[dashboard]
# Automatic refresh period (ms)
refresh_interval_ms = 30000

# Honey quantity bands
high_production_threshold = 5000.0
low_production_threshold = 1000.0

# Planned visits shown in the recent-visits list
recent_visits_limit = 5

# Rows shown in each production table
table_rows = 5

# Connectivity probe period (ms)
probe_interval_ms = 10000

[alerts]
# Listen to the alert stream
enabled = true

# WebSocket endpoint delivering one JSON alert per message
ws_url = "ws://localhost:8080/smart-bee-house/ws/alerts"

# Alerts kept in memory, oldest evicted first
max_retained = 100

# Attempt system notifications
notifications = true

# Reconnect backoff bounds (ms)
reconnect_initial_ms = 1000
reconnect_max_ms = 30000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
