use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Word budget applied when the caller does not supply a usable value.
pub const DEFAULT_MAX_WORDS: usize = 100;
/// Largest word budget accepted from the upload form.
pub const DEFAULT_MAX_WORDS_LIMIT: usize = 500;
/// Default cap on the request body size for uploads (20 MiB).
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 20 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the PDF summary server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Budget used when the form omits `max_words` or sends something non-numeric.
    pub summary_default_max_words: usize,
    /// Upper bound applied when clamping user supplied budgets.
    pub summary_max_words_limit: usize,
    /// Maximum accepted request body size in bytes.
    pub upload_max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: None,
            summary_default_max_words: DEFAULT_MAX_WORDS,
            summary_max_words_limit: DEFAULT_MAX_WORDS_LIMIT,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let summary_max_words_limit =
            parse_optional("SUMMARY_MAX_WORDS_LIMIT")?.unwrap_or(defaults.summary_max_words_limit);
        if summary_max_words_limit == 0 {
            return Err(ConfigError::InvalidValue("SUMMARY_MAX_WORDS_LIMIT".into()));
        }
        let summary_default_max_words = parse_optional("SUMMARY_DEFAULT_MAX_WORDS")?
            .unwrap_or(defaults.summary_default_max_words);
        if summary_default_max_words == 0 {
            return Err(ConfigError::InvalidValue(
                "SUMMARY_DEFAULT_MAX_WORDS".into(),
            ));
        }

        Ok(Self {
            server_port: parse_optional("SERVER_PORT")?,
            summary_default_max_words,
            summary_max_words_limit,
            upload_max_bytes: parse_optional("UPLOAD_MAX_BYTES")?
                .unwrap_or(defaults.upload_max_bytes),
        })
    }
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        server_port = ?config.server_port,
        default_max_words = config.summary_default_max_words,
        max_words_limit = config.summary_max_words_limit,
        upload_max_bytes = config.upload_max_bytes,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
