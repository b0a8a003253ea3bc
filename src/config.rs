//! Configuration management for trackscope.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files. Values are read once at startup into a
//! [`Config`] which is then handed to the server and CLI explicitly.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_LYRICS_API_URL: &str = "https://api.lyrics.ovh";
pub const DEFAULT_LYRICS_TIMEOUT_SECS: u64 = 1;
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 5;

const APP_DIR: &str = "trackscope";
const DATABASE_FILE: &str = "spotify.sqlite3";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub client_id: String,
    pub client_secret: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub lyrics_api_url: String,
    pub lyrics_timeout: Duration,
    pub recommendation_limit: u32,
    pub database_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the Spotify client credentials
    /// are absent and [`ConfigError::Invalid`] when a numeric setting cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &str, default: &str| -> String {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let lyrics_timeout_secs = parse_number(
            "LYRICS_TIMEOUT_SECS",
            lookup("LYRICS_TIMEOUT_SECS"),
            DEFAULT_LYRICS_TIMEOUT_SECS,
        )?;
        let recommendation_limit = parse_number(
            "RECOMMENDATION_LIMIT",
            lookup("RECOMMENDATION_LIMIT"),
            DEFAULT_RECOMMENDATION_LIMIT,
        )?;

        Ok(Self {
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            spotify_api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            spotify_token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            lyrics_api_url: or_default("LYRICS_API_URL", DEFAULT_LYRICS_API_URL),
            lyrics_timeout: Duration::from_secs(lyrics_timeout_secs),
            recommendation_limit,
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(default_database_url),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        _ => Ok(default),
    }
}

/// Returns the platform-specific data directory of the application.
///
/// - Linux: `~/.local/share/trackscope`
/// - macOS: `~/Library/Application Support/trackscope`
/// - Windows: `%LOCALAPPDATA%/trackscope`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// SQLite URL of the cache database inside [`data_dir`].
pub fn default_database_url() -> String {
    format!("sqlite:{}", data_dir().join(DATABASE_FILE).display())
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist, so the default cache
/// database can be created there as well. A missing `.env` file is not an
/// error; the process environment is used as-is in that case.
///
/// # Returns
///
/// Returns `Ok(true)` when a `.env` file was loaded, `Ok(false)` when none
/// exists, or an error string if directory creation or parsing fails.
pub async fn load_env() -> Result<bool, String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(false);
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(true)
}
