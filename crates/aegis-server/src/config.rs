//! Server configuration loading from file and environment variables.

use aegis_translate::TranslationConfig;
use aegis_voice::VoiceConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Voice vendor settings.
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Text-generation vendor settings.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Request size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "aegis_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Body size ceilings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsConfig {
    /// Ceiling for JSON request bodies.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,

    /// Ceiling for the voice sample upload.
    #[serde(default = "default_max_audio_upload_bytes")]
    pub max_audio_upload_bytes: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_request_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_max_audio_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: default_max_request_bytes(),
            max_audio_upload_bytes: default_max_audio_upload_bytes(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A vendor base URL is not an absolute http(s) URL.
    #[error("invalid {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    /// A vendor client could not be constructed.
    #[error("failed to initialize {vendor} client: {reason}")]
    Client {
        vendor: &'static str,
        reason: String,
    },
}

impl Config {
    /// Checks settings that would otherwise only fail on the first request.
    ///
    /// Missing credentials are not an error here; the affected routes answer
    /// with a configuration error instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_base_url("voice.base_url", &self.voice.base_url)?;
        check_base_url("translation.base_url", &self.translation.base_url)?;
        Ok(())
    }
}

fn check_base_url(field: &'static str, raw: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: format!("{:?}: {}", raw, e),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: format!("{:?} is not an http(s) URL", raw),
        });
    }
    Ok(())
}

/// Applies environment overrides, reading variables through `lookup`.
///
/// - `AEGIS_HOST` overrides `server.host`
/// - `AEGIS_PORT` overrides `server.port`
/// - `AEGIS_LOG_LEVEL` overrides `logging.level`
/// - `AEGIS_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `AEGIS_VOICE_BASE_URL` overrides `voice.base_url`
/// - `AEGIS_TRANSLATION_BASE_URL` overrides `translation.base_url`
/// - `ELEVEN_LABS_API_KEY` overrides `voice.api_key`
/// - `PERPLEXITY_API_KEY` overrides `translation.api_key`
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("AEGIS_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("AEGIS_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("AEGIS_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("AEGIS_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(url) = lookup("AEGIS_VOICE_BASE_URL") {
        config.voice.base_url = url;
    }
    if let Some(url) = lookup("AEGIS_TRANSLATION_BASE_URL") {
        config.translation.base_url = url;
    }
    if let Some(key) = lookup("ELEVEN_LABS_API_KEY") {
        config.voice.api_key = key;
    }
    if let Some(key) = lookup("PERPLEXITY_API_KEY") {
        config.translation.api_key = key;
    }
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides and validates the result.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if a vendor base URL is invalid.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}
