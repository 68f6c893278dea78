//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://queue.fal.run/fal-ai/fast-sdxl";
pub const DEFAULT_VIDEO_ENDPOINT: &str =
    "https://queue.fal.run/fal-ai/kling-video/v1/standard/text-to-video";

/// Short environment variable names and the setting each one overrides.
/// These win over the file and the `MEDIA_RELAY__*` variables.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("FAL_KEY", "provider.api_key"),
    ("FAL_IMAGE_ENDPOINT", "provider.image_endpoint"),
    ("FAL_VIDEO_ENDPOINT", "provider.video_endpoint"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
];

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream provider configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_image_endpoint")]
    pub image_endpoint: String,
    #[serde(default = "default_video_endpoint")]
    pub video_endpoint: String,
    #[serde(default = "default_image_timeout")]
    pub image_timeout_secs: u64,
    #[serde(default = "default_video_timeout")]
    pub video_timeout_secs: u64,
}

fn default_image_endpoint() -> String {
    DEFAULT_IMAGE_ENDPOINT.to_string()
}

fn default_video_endpoint() -> String {
    DEFAULT_VIDEO_ENDPOINT.to_string()
}

fn default_image_timeout() -> u64 {
    120
}

fn default_video_timeout() -> u64 {
    300
}

impl ProviderConfig {
    /// The API key, or an empty string when unset
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_secs(self.video_timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            image_endpoint: default_image_endpoint(),
            video_endpoint: default_video_endpoint(),
            image_timeout_secs: default_image_timeout(),
            video_timeout_secs: default_video_timeout(),
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("image_endpoint", &self.image_endpoint)
            .field("video_endpoint", &self.video_endpoint)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("video_timeout_secs", &self.video_timeout_secs)
            .finish()
    }
}

/// Asset store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "./output".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
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
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path and the process environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let env: Map<String, String> = std::env::vars().collect();
        Self::load_with_env(path, env)
    }

    /// Load settings from a configuration file and an explicit set of environment variables
    pub fn load_with_env<P: AsRef<Path>>(path: P, env: Map<String, String>) -> Result<Self> {
        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("provider.image_endpoint", DEFAULT_IMAGE_ENDPOINT)?
            .set_default("provider.video_endpoint", DEFAULT_VIDEO_ENDPOINT)?
            .set_default("storage.output_dir", default_output_dir())?
            // Load from configuration file
            .add_source(File::from(path.as_ref()).required(false));

        // Short names take precedence; an empty value counts as unset
        for (var, key) in ENV_OVERRIDES {
            let value = env.get(*var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let config = builder
            // Override with environment variables (prefixed with MEDIA_RELAY__)
            .add_source(
                Environment::with_prefix("MEDIA_RELAY")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key().trim().is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Missing FAL_KEY: the provider API key is required".to_string(),
            )));
        }

        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        for (name, endpoint) in [
            ("image_endpoint", &self.provider.image_endpoint),
            ("video_endpoint", &self.provider.video_endpoint),
        ] {
            if endpoint.is_empty() {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Provider {} cannot be empty",
                    name
                ))));
            }
        }

        if self.provider.image_timeout_secs == 0 || self.provider.video_timeout_secs == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Provider timeouts must be greater than 0".to_string(),
            )));
        }

        Ok(())
    }
}
