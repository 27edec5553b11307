//! Service configuration
//!
//! Loaded from a TOML file (`--config`, or `~/.wms/config.toml`) or from
//! `DB_*` environment variables. The storage layer only ever sees the
//! resulting [`PostgresConfig`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, WmsError};

pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_SSL_MODE: &str = "DB_SSL_MODE";
pub const ENV_DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Default pool size. Kept low; every call holds a connection only for
/// the lifetime of one transaction.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub postgres: PostgresConfig,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub db_name: String,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl PostgresConfig {
    /// Render the sqlx/libpq connection URL. Credentials and database name
    /// are percent-encoded.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode={}",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.db_name),
            urlencoding::encode(&self.ssl_mode)
        )
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Config {
    /// Default config file path: ~/.wms/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wms/config.toml")
    }

    /// Load from an explicit file, else the default file if present,
    /// else the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Self::default_path();
        if default_path.exists() {
            return Self::from_file(&default_path);
        }

        debug!("no config file found, reading environment");
        Self::from_env()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WmsError::io(path, e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| WmsError::config_parse(path, e))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(WmsError::MissingEnv { name });

        let port_raw = required(ENV_DB_PORT)?;
        let port = port_raw.parse().map_err(|_| WmsError::InvalidEnv {
            name: ENV_DB_PORT,
            value: port_raw.clone(),
        })?;

        let max_connections = match lookup(ENV_DB_MAX_CONNECTIONS) {
            Some(raw) => raw.parse().map_err(|_| WmsError::InvalidEnv {
                name: ENV_DB_MAX_CONNECTIONS,
                value: raw,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(default_log_level),
            postgres: PostgresConfig {
                host: required(ENV_DB_HOST)?,
                port,
                username: required(ENV_DB_USERNAME)?,
                password: required(ENV_DB_PASSWORD)?,
                db_name: required(ENV_DB_NAME)?,
                ssl_mode: required(ENV_DB_SSL_MODE)?,
                max_connections,
            },
        })
    }
}
