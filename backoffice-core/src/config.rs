//! Service configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. optional TOML file (`--config` / `BACKOFFICE_CONFIG`)
//! 3. environment variables (`.env` is loaded by the binary first)
//!
//! Environment variables:
//!   DATABASE_URL              connection string of the document store
//!   HOST / PORT               listen address (default 0.0.0.0:5000)
//!   APP_ENV                   development | production | test
//!   DB_CONNECT_TIMEOUT_MS     bound on each connection attempt
//!   DB_RETRY_DELAY_MS         fixed delay between attempts
//!   DB_MAX_CONNECT_ATTEMPTS   cap on attempts (unset = retry forever)
//!   DB_MAX_CONNECTIONS        pool size

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Deployment environment; controls error detail in responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub connect_timeout_ms: u64,
    pub retry_delay_ms: u64,
    pub max_connect_attempts: Option<u32>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5000,
            retry_delay_ms: 5000,
            max_connect_attempts: None,
            max_connections: 5,
        }
    }
}

impl DatabaseSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Top-level back office configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackofficeConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub database: DatabaseSettings,
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/backoffice".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::default(),
            database: DatabaseSettings::default(),
        }
    }
}

impl BackofficeConfig {
    /// Load from an optional file, then apply the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("BACKOFFICE_CONFIG").ok().map(PathBuf::from));

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.with_env(|name| std::env::var(name).ok())
    }

    /// Parse a TOML config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process env in production).
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            self.port = port;
        }
        if let Some(value) = lookup("APP_ENV") {
            self.environment = value
                .parse()
                .map_err(|reason| ConfigError::invalid_env("APP_ENV", &value, reason))?;
        }
        if let Some(ms) = parse_var(&lookup, "DB_CONNECT_TIMEOUT_MS")? {
            self.database.connect_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "DB_RETRY_DELAY_MS")? {
            self.database.retry_delay_ms = ms;
        }
        if let Some(max) = parse_var(&lookup, "DB_MAX_CONNECT_ATTEMPTS")? {
            self.database.max_connect_attempts = Some(max);
        }
        if let Some(max) = parse_var(&lookup, "DB_MAX_CONNECTIONS")? {
            self.database.max_connections = max;
        }
        Ok(self)
    }

    /// Listen address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::invalid_env(var, raw, e.to_string())),
        None => Ok(None),
    }
}
