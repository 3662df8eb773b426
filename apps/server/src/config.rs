//! Application configuration.

use monitor_core::{AlertConfig, ConfigPayload, MonitorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial alert settings, same shape as the API payload.
    pub alert: ConfigPayload,
    /// Price feed settings.
    pub feed: FeedSettings,
    /// Notification sinks.
    pub notifier: NotifierSettings,
    /// HTTP API settings.
    pub server: ServerSettings,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alert: ConfigPayload::from(&AlertConfig::default()),
            feed: FeedSettings::default(),
            notifier: NotifierSettings::default(),
            server: ServerSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Validated alert config to start the monitor with.
    pub fn alert_config(&self) -> Result<AlertConfig, MonitorError> {
        AlertConfig::try_from(self.alert.clone())
    }
}

/// Price feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Ticker symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// REST API base URL.
    pub base_url: String,
    /// Use the offline simulator instead of the REST API.
    pub simulate: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            base_url: "https://api.binance.com".to_string(),
            simulate: false,
        }
    }
}

/// Notification sink settings. Alerts always go to the log as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierSettings {
    /// Desktop notification program, e.g. "notify-send".
    pub desktop_command: Option<String>,
    /// Telegram delivery.
    pub telegram: Option<TelegramSettings>,
}

/// Telegram bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramSettings {
    /// Create settings from environment variables.
    /// Uses TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;

        if bot_token.is_empty() || chat_id.is_empty() {
            return None;
        }

        Some(Self { bot_token, chat_id })
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    /// Directory with the browser config page. `null` disables it.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            static_dir: Some(PathBuf::from("static")),
        }
    }
}
