//! Configuration management for the playlist migrator.
//!
//! Values come from environment variables, optionally seeded from `.env` files.
//! They are collected once into a [`Config`] value which is passed explicitly to
//! the clients that need it.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf};

/// Largest number of tracks Tidal accepts in one append request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Loads environment variables from `.env` files.
///
/// Looks in the working directory first and then in the platform-specific local
/// data directory under `plmigrate/.env`. Variables that are already set are
/// never overridden. Missing files are not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/plmigrate/.env`
/// - macOS: `~/Library/Application Support/plmigrate/.env`
/// - Windows: `%LOCALAPPDATA%/plmigrate/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| e.to_string())?;
    }
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything the application stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plmigrate");
    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(
                f,
                "{} must be set (see {})",
                key,
                data_dir().join(".env.example").display()
            ),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value '{}'", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for both services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Spotify application client id used for the PKCE flow.
    pub spotify_client_id: String,
    pub spotify_redirect_uri: String,
    pub spotify_scope: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    /// Bind address of the local OAuth callback server.
    pub server_addr: String,
    pub tidal_client_id: String,
    /// Sent with token requests only when non-empty.
    pub tidal_client_secret: String,
    pub tidal_auth_url: String,
    pub tidal_api_url: String,
    pub tidal_openapi_url: String,
    pub tidal_scope: String,
    /// Tracks per append request, always within `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `SPOTIFY_API_AUTH_CLIENT_ID` or
    /// `TIDAL_CLIENT_ID` is unset, and [`ConfigError::Invalid`] when
    /// `MIGRATE_BATCH_SIZE` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let batch_size = match lookup("MIGRATE_BATCH_SIZE").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid {
                    key: "MIGRATE_BATCH_SIZE",
                    value: value.clone(),
                })?
                .clamp(1, MAX_BATCH_SIZE),
            None => MAX_BATCH_SIZE,
        };

        Ok(Self {
            spotify_client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            spotify_redirect_uri: get(
                "SPOTIFY_API_REDIRECT_URI",
                "http://127.0.0.1:8888/callback",
            ),
            spotify_scope: get(
                "SPOTIFY_API_AUTH_SCOPE",
                "user-library-read playlist-read-private",
            ),
            spotify_auth_url: get(
                "SPOTIFY_API_AUTH_URL",
                "https://accounts.spotify.com/authorize",
            ),
            spotify_token_url: get(
                "SPOTIFY_API_TOKEN_URL",
                "https://accounts.spotify.com/api/token",
            ),
            spotify_api_url: get("SPOTIFY_API_URL", "https://api.spotify.com/v1"),
            server_addr: get("SERVER_ADDRESS", "127.0.0.1:8888"),
            tidal_client_id: required("TIDAL_CLIENT_ID")?,
            tidal_client_secret: get("TIDAL_CLIENT_SECRET", ""),
            tidal_auth_url: get("TIDAL_AUTH_URL", "https://auth.tidal.com/v1/oauth2"),
            tidal_api_url: get("TIDAL_API_URL", "https://api.tidal.com/v1"),
            tidal_openapi_url: get("TIDAL_OPENAPI_URL", "https://openapi.tidal.com/v2"),
            tidal_scope: get("TIDAL_API_AUTH_SCOPE", "r_usr w_usr w_sub"),
            batch_size,
        })
    }
}
