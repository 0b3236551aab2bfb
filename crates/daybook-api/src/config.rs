//! Server configuration read from the environment.

use std::path::PathBuf;

use axum::http::HeaderValue;
use tracing::warn;

use daybook_core::{defaults, Error, Result};

/// Settings for one server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Raw HMAC key for session tokens. `None` means generate one per process.
    pub token_secret: Option<Vec<u8>>,
    pub allowed_origins: Vec<HeaderValue>,
    /// Pre-built client bundle served for non-API paths.
    pub static_dir: Option<PathBuf>,
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_string(),
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            token_secret: None,
            allowed_origins: default_origins(),
            static_dir: None,
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(max) = get("DB_MAX_CONNECTIONS") {
            config.db_max_connections = max.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "DB_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    max
                ))
            })?;
            if config.db_max_connections == 0 {
                return Err(Error::Config(
                    "DB_MAX_CONNECTIONS must be at least 1".to_string(),
                ));
            }
        }
        config.token_secret = get("TOKEN_SECRET").map(String::into_bytes);
        if let Some(origins) = get("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_allowed_origins(&origins);
        }
        config.static_dir = get("STATIC_DIR").map(PathBuf::from);

        Ok(config)
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_origins() -> Vec<HeaderValue> {
    vec![
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://localhost:5173"),
    ]
}

/// Parse a comma-separated CORS origin list, skipping invalid entries.
///
/// ```text
/// ALLOWED_ORIGINS=https://daybook.example.com,http://localhost:5173
/// ```
pub fn parse_allowed_origins(origins_str: &str) -> Vec<HeaderValue> {
    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        return default_origins();
    }
    origins
}
