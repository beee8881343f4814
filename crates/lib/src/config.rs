//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.kitchensink/config.json`) and environment.
//! Bot secrets resolve as env var, then config file, then an embedded placeholder.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_CHANNEL_TOKEN: &str = "LINEBOT_CHANNEL_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "LINEBOT_CHANNEL_SECRET";
pub const ENV_API_ENDPOINT_BASE: &str = "LINEBOT_API_ENDPOINT_BASE";
pub const ENV_CONFIG_PATH: &str = "LINEBOT_CONFIG_PATH";

/// Placeholder used when no channel access token is configured. Not a usable credential.
pub const FALLBACK_CHANNEL_TOKEN: &str = "placeholder-channel-access-token";
/// Placeholder used when no channel secret is configured. Not a usable credential.
pub const FALLBACK_CHANNEL_SECRET: &str = "placeholder-channel-secret";

/// Top-level application config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Bot, logger and error display settings.
    #[serde(default)]
    pub settings: Settings,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Include error text in 500 responses. Set to false in production.
    #[serde(default = "default_display_error_details")]
    pub display_error_details: bool,

    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub bot: BotConfig,

    /// LINE API base URL. Overridden by LINEBOT_API_ENDPOINT_BASE env.
    #[serde(default)]
    pub api_endpoint_base: Option<String>,
}

fn default_display_error_details() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_error_details: default_display_error_details(),
            logger: LoggerConfig::default(),
            bot: BotConfig::default(),
            api_endpoint_base: None,
        }
    }
}

/// Logger name and sink. `path: null` logs to stderr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    #[serde(default = "default_logger_name")]
    pub name: String,

    #[serde(default = "default_logger_path")]
    pub path: Option<PathBuf>,
}

fn default_logger_name() -> String {
    "kitchensink".to_string()
}

fn default_logger_path() -> Option<PathBuf> {
    Some(PathBuf::from("logs").join("app.log"))
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: default_logger_name(),
            path: default_logger_path(),
        }
    }
}

/// Channel credentials from the LINE developers console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Overridden by LINEBOT_CHANNEL_TOKEN env when set.
    pub channel_token: Option<String>,
    /// Overridden by LINEBOT_CHANNEL_SECRET env when set.
    pub channel_secret: Option<String>,
}

/// Gateway bind, port and static asset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Port for the webhook endpoint (default 8080).
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_server_bind")]
    pub bind: String,

    /// Directory served under `/static`. Holds `buttons/1040.jpg` and the `rich/` image map tiles.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Public origin used for asset links (e.g. "https://bot.example.com"). When unset, derived from the request Host header.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_server_port() -> u16 {
    8080
}

fn default_server_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public").join("static")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            bind: default_server_bind(),
            static_dir: default_static_dir(),
            public_base_url: None,
        }
    }
}

/// Bot credentials and endpoint after env/config/fallback resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub channel_token: String,
    pub channel_secret: String,
    pub api_endpoint_base: Option<String>,
}

impl BotSettings {
    /// Resolve against the process environment.
    pub fn from_env(config: &Config) -> Self {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit env lookup: env var, then config value, then placeholder.
    pub fn resolve<F>(config: &Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot = &config.settings.bot;
        let channel_token = non_empty(lookup(ENV_CHANNEL_TOKEN))
            .or_else(|| non_empty(bot.channel_token.clone()))
            .unwrap_or_else(|| {
                log::warn!("{} not set, using placeholder channel token", ENV_CHANNEL_TOKEN);
                FALLBACK_CHANNEL_TOKEN.to_string()
            });
        let channel_secret = non_empty(lookup(ENV_CHANNEL_SECRET))
            .or_else(|| non_empty(bot.channel_secret.clone()))
            .unwrap_or_else(|| {
                log::warn!("{} not set, using placeholder channel secret", ENV_CHANNEL_SECRET);
                FALLBACK_CHANNEL_SECRET.to_string()
            });
        let api_endpoint_base = non_empty(lookup(ENV_API_ENDPOINT_BASE))
            .or_else(|| non_empty(config.settings.api_endpoint_base.clone()));
        Self {
            channel_token,
            channel_secret,
            api_endpoint_base,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Hide all but the first four characters of a secret (for `linebot config`).
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var(ENV_CONFIG_PATH).map(PathBuf::from).unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|h| h.join(".kitchensink").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    })
}

/// Load config from the given path (or default). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

/// Resolve a configured relative path (log file, static dir) against the config file's parent.
pub fn resolve_relative(config_path: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    config_path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(p)
}
