//! Configuration management for the Spotify card resolver.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Configuration is read once at startup into an
//! immutable [`Config`] value that is shared by every component of the resolver.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, ops::RangeInclusive, path::PathBuf, time::Duration};

use chrono::TimeDelta;

use crate::{types::Credentials, warning};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_OPEN_URL: &str = "https://open.spotify.com";
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get?url=";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// variables from `spotcard/.env` under the platform-specific local data
/// directory. A missing file is not an error: the process environment alone
/// is a valid configuration source.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotcard/.env`
/// - macOS: `~/Library/Application Support/spotcard/.env`
/// - Windows: `%LOCALAPPDATA%/spotcard/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotcard/.env");
    path
}

/// Immutable runtime configuration.
///
/// Base URLs are plain fields so embedders and tests can point the resolver
/// at any compatible upstream.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when either credential is missing; only token-needing paths fail.
    pub credentials: Option<Credentials>,
    pub api_url: String,
    pub token_url: String,
    pub open_url: String,
    /// Prefix the percent-encoded page URL is appended to.
    pub proxy_url: String,
    pub server_address: String,
    pub upstream_timeout: Duration,
    pub scrape_timeout: Duration,
    /// Subtracted from the provider TTL when computing token expiry.
    pub token_margin: TimeDelta,
    /// Fresh-hit window of the resolution cache.
    pub fresh_for: TimeDelta,
    /// Entries older than this are purged on the next cache write.
    pub evict_after: TimeDelta,
    /// Range, in seconds, for the fabricated duration of scraped tracks.
    pub scrape_duration_secs: RangeInclusive<u64>,
    pub scrape_fallback: bool,
}

impl Config {
    /// Defaults pointing at the public Spotify endpoints.
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            open_url: DEFAULT_OPEN_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            upstream_timeout: Duration::from_secs(8),
            scrape_timeout: Duration::from_secs(10),
            token_margin: TimeDelta::minutes(5),
            fresh_for: TimeDelta::seconds(300),
            evict_after: TimeDelta::seconds(3600),
            scrape_duration_secs: 150..=270,
            scrape_fallback: true,
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// Recognised variables:
    ///
    /// - `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`
    /// - `SPOTIFY_API_URL`, `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_OPEN_URL`
    /// - `SCRAPE_PROXY_URL`, `SCRAPE_FALLBACK` (`false`/`0` disables)
    /// - `SERVER_ADDRESS`
    /// - `UPSTREAM_TIMEOUT_SECS`, `SCRAPE_TIMEOUT_SECS`
    ///
    /// Invalid numeric values fall back to their default with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::new(credentials_from_env());
        config.api_url = env_or("SPOTIFY_API_URL", DEFAULT_API_URL);
        config.token_url = env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL);
        config.open_url = env_or("SPOTIFY_OPEN_URL", DEFAULT_OPEN_URL);
        config.proxy_url = env_or("SCRAPE_PROXY_URL", DEFAULT_PROXY_URL);
        config.server_address = env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        config.upstream_timeout = secs_or("UPSTREAM_TIMEOUT_SECS", config.upstream_timeout);
        config.scrape_timeout = secs_or("SCRAPE_TIMEOUT_SECS", config.scrape_timeout);
        config.scrape_fallback = env::var("SCRAPE_FALLBACK")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);
        config
    }
}

/// Reads `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`.
///
/// Both must be present and non-empty, otherwise no credentials are configured.
pub fn credentials_from_env() -> Option<Credentials> {
    let client_id = env::var("SPOTIFY_CLIENT_ID").ok()?;
    let client_secret = env::var("SPOTIFY_CLIENT_SECRET").ok()?;
    if client_id.trim().is_empty() || client_secret.trim().is_empty() {
        return None;
    }
    Some(Credentials::new(client_id.trim(), client_secret.trim()))
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn secs_or(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warning!(
                    "Ignoring invalid {}={}, using {}s",
                    key,
                    value,
                    default.as_secs()
                );
                default
            }
        },
        Err(_) => default,
    }
}
