//! Configuration management for sprofile.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the local data directory. Every value has a built-in default, so
//! the application runs without any configuration against the public client.
//!
//! Precedence:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_CLIENT_ID: &str = "d9e186857dd44b08a32935cb77cb5d4e";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173/callback";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";

/// Returns the application's directory below the platform data directory.
///
/// - Linux: `~/.local/share/sprofile`
/// - macOS: `~/Library/Application Support/sprofile`
/// - Windows: `%LOCALAPPDATA%/sprofile`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sprofile");
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// Creates the data directory if needed. A missing `.env` file is fine since
/// every setting has a default; a file that exists but cannot be parsed is an
/// error. Variables already set in the environment are not overridden.
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)))
}

/// Runtime settings for one sign-in flow.
///
/// The client id is public: PKCE replaces the client secret.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
}

impl Settings {
    /// Collects settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Collects settings through `lookup`, falling back to defaults for
    /// unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let server_address = get("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr = SocketAddr::from_str(&server_address)
            .map_err(|e| Error::Config(format!("invalid SERVER_ADDRESS: {}", e)))?;

        Ok(Self {
            client_id: get("SPOTIFY_API_AUTH_CLIENT_ID", DEFAULT_CLIENT_ID),
            redirect_uri: get("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: get("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: get("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: get("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: get("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_addr,
        })
    }

    /// Address the browser is sent to in order to start a fresh sign-in.
    pub fn app_url(&self) -> String {
        format!("http://{}/", self.server_addr)
    }

    /// Describes a redirect URI whose port is not the one the page listens on.
    ///
    /// The authorization server sends the browser back to `redirect_uri`, so
    /// with a different port the callback never reaches this process.
    pub fn redirect_port_mismatch(&self) -> Option<String> {
        let redirect = Url::parse(&self.redirect_uri).ok()?;
        let port = redirect.port_or_known_default()?;
        if port == self.server_addr.port() {
            return None;
        }

        Some(format!(
            "SPOTIFY_API_REDIRECT_URI uses port {} but the page listens on {}",
            port, self.server_addr
        ))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5173)),
        }
    }
}
