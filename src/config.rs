//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup. A `.env` file is honoured for local
//! development.

use std::env;
use std::path::PathBuf;

const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Frontend URL for OAuth redirects
    pub frontend_url: String,
    /// Directory holding the persisted token and sync-store documents
    pub data_dir: PathBuf,
    /// Server port
    pub port: u16,
    /// Strava REST API base URL
    pub strava_api_url: String,
    /// Strava OAuth base URL (`/authorize`, `/token`, `/deauthorize`)
    pub strava_oauth_url: String,

    // --- Secrets ---
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Bearer key required to trigger a sync or disconnect
    pub sync_api_key: String,
    /// HMAC key used to sign the OAuth `state` parameter (raw bytes)
    pub oauth_state_key: Vec<u8>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            port: 8080,
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_oauth_url: DEFAULT_STRAVA_OAUTH_URL.to_string(),
            strava_client_secret: "test_secret".to_string(),
            sync_api_key: "test_sync_key".to_string(),
            oauth_state_key: b"test_state_key_32_bytes_minimum!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            strava_api_url: env::var("STRAVA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_STRAVA_API_URL.to_string()),
            strava_oauth_url: env::var("STRAVA_OAUTH_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_STRAVA_OAUTH_URL.to_string()),

            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            sync_api_key: env::var("SYNC_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SYNC_API_KEY"))?,
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
