//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `API_SECRET_KEY` (optional): shared secret expected in `Authorization: Token <secret>`.
///   Empty or unset disables authentication.
/// - `SERVER_ADDRESS` (optional): bind address, defaults to `0.0.0.0:80`
/// - `DEBUG_MODE` (optional): lowers the default log level to `debug`, defaults to false
/// - `LOG_JSON` (optional): emit JSON log lines, defaults to false
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_secret_key: String,

    #[serde(default = "default_server_address")]
    pub server_address: String,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default)]
    pub log_json: bool,
}

fn default_server_address() -> String {
    "0.0.0.0:80".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into the expected type (e.g. `DEBUG_MODE=maybe`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Build configuration from explicit key/value pairs.
    ///
    /// Keys use the same upper-case names as the environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }

    /// Log filter used when `RUST_LOG` is not set.
    ///
    /// Request logs are emitted at debug level, so they only show up in debug mode.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug_mode { "debug" } else { "info" }
    }
}
