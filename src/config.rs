//! Configuration management for the spotifytime web service.
//!
//! This module loads configuration values from environment variables and `.env`
//! files and turns them into a typed [`Settings`] value. The settings are read
//! once at start-up and then handed to the server, so nothing below the `main`
//! function reads the environment again.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, time::Duration};

pub const DEFAULT_SCOPE: &str =
    "user-modify-playback-state user-read-playback-state user-read-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const MIN_SECRET_LEN: usize = 32;

/// Loads environment variables from `.env` files.
///
/// Creates the platform-specific data directory if it doesn't exist and loads
/// `spotifytime/.env` from it, followed by a `.env` in the working directory.
/// Both files are optional. Variables already present in the process
/// environment are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotifytime/.env`
/// - macOS: `~/Library/Application Support/spotifytime/.env`
/// - Windows: `%LOCALAPPDATA%/spotifytime/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotifytime/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings of the service.
///
/// Built by [`Settings::from_env`] in production and by
/// [`Settings::from_lookup`] wherever a custom source is needed.
#[derive(Clone)]
pub struct Settings {
    /// Address the HTTP server binds to, e.g. `0.0.0.0:8000`.
    pub server_address: String,
    pub client_id: String,
    /// Confidential clients authenticate the code exchange with this secret.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Key used to sign new session cookies.
    pub session_secret: String,
    /// Retired key still accepted when verifying cookies during rotation.
    pub session_secret_previous: Option<String>,
    /// Upper bound for every outbound call to Spotify.
    pub http_timeout: Duration,
    pub cookie_secure: bool,
}

// Secrets stay out of debug output.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server_address", &self.server_address)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("http_timeout", &self.http_timeout)
            .field("cookie_secure", &self.cookie_secure)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// Call [`load_env`] first so values from `.env` files are visible.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let client_id = require("SPOTIFY_API_AUTH_CLIENT_ID")?;
        let redirect_uri = require("SPOTIFY_API_REDIRECT_URI")?;
        if !(redirect_uri.starts_with("http://") || redirect_uri.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "SPOTIFY_API_REDIRECT_URI",
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let session_secret = require("SESSION_SECRET")?;
        check_secret("SESSION_SECRET", &session_secret)?;
        let session_secret_previous = get("SESSION_SECRET_PREVIOUS");
        if let Some(previous) = &session_secret_previous {
            check_secret("SESSION_SECRET_PREVIOUS", previous)?;
        }

        let server_address = match get("SERVER_ADDRESS") {
            Some(address) => address,
            None => format!(
                "0.0.0.0:{}",
                get("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string())
            ),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got {:?}", raw),
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "COOKIE_SECURE",
                reason: format!("expected true or false, got {:?}", raw),
            })?,
            None => redirect_uri.starts_with("https://"),
        };

        Ok(Self {
            server_address,
            client_id,
            client_secret: get("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            redirect_uri,
            session_secret,
            session_secret_previous,
            http_timeout,
            cookie_secure,
        })
    }
}

fn check_secret(key: &'static str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("must be at least {} bytes long", MIN_SECRET_LEN),
        });
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
