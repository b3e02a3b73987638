//! HTTP server command
//!
//! Starts listening right away and connects to the document store in
//! the background; requests answer 500 until the store is up.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use backoffice_core::BackofficeConfig;
use backoffice_server::{
    run_server, ConnectOptions, ConnectionManager, MemoryConnector, MemoryStore, PgConnector,
    RetryPolicy, ServerConfig,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// TOML config file (default: BACKOFFICE_CONFIG, then built-in defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides config/HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config/PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Database URL (overrides config/DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Use an in-memory store instead of PostgreSQL
    #[arg(long, conflicts_with = "database_url")]
    pub memory: bool,

    /// Only allow localhost origins instead of any origin
    #[arg(long)]
    pub localhost_cors: bool,
}

impl ServeArgs {
    fn resolve_config(&self) -> Result<BackofficeConfig> {
        let mut config = BackofficeConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        Ok(config)
    }
}

fn connect_options(config: &BackofficeConfig) -> ConnectOptions {
    ConnectOptions {
        timeout: config.database.connect_timeout(),
        retry: RetryPolicy {
            delay: config.database.retry_delay(),
            max_attempts: config.database.max_connect_attempts,
        },
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let bind_addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr()))?;

    tracing::info!(
        environment = %config.environment,
        memory = args.memory,
        "Starting backoffice server on {}",
        bind_addr
    );

    let connection = Arc::new(ConnectionManager::new());
    let options = connect_options(&config);
    let connect_task = if args.memory {
        let connector = Arc::new(MemoryConnector::new(Arc::new(MemoryStore::new())));
        connection.connect(connector, "memory://".to_string(), options)
    } else {
        let connector = Arc::new(PgConnector::new(config.database.max_connections));
        connection.connect(connector, config.database_url.clone(), options)
    };

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: !args.localhost_cors,
    };

    // Blocks until shutdown
    let result = run_server(connection, config.environment, server_config)
        .await
        .context("Server error");
    connect_task.abort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backoffice.toml");
        std::fs::write(&path, "port = 7000\nhost = \"127.0.0.1\"\n").unwrap();

        let args = ServeArgs {
            config: Some(path),
            host: None,
            port: Some(7100),
            database_url: Some("postgres://db/salon".into()),
            memory: false,
            localhost_cors: false,
        };
        let config = args.resolve_config().unwrap();
        assert_eq!(config.port, 7100);
        assert_eq!(config.database_url, "postgres://db/salon");
    }

    #[test]
    fn connect_options_follow_database_settings() {
        let mut config = BackofficeConfig::default();
        config.database.retry_delay_ms = 250;
        config.database.max_connect_attempts = Some(4);
        let options = connect_options(&config);
        assert_eq!(options.retry.delay, Duration::from_millis(250));
        assert_eq!(options.retry.max_attempts, Some(4));
        assert_eq!(options.timeout, Duration::from_millis(5000));
    }
}
