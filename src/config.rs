use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug)]
pub struct BookshelfConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_address: SocketAddr,
    pub log_level: String,
}

impl BookshelfConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(val) => val
                .parse::<u32>()
                .with_context(|| format!("MAX_CONNECTIONS must be a positive integer, got {val:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        anyhow::ensure!(max_connections > 0, "MAX_CONNECTIONS must be at least 1");

        let acquire_timeout_secs = match lookup("ACQUIRE_TIMEOUT_SECS") {
            Some(val) => val.parse::<u64>().with_context(|| {
                format!("ACQUIRE_TIMEOUT_SECS must be a number of seconds, got {val:?}")
            })?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDRESS is not a socket address: {bind_address:?}"))?;

        // RUST_LOG takes precedence over LOG_LEVEL
        let log_level = lookup("RUST_LOG")
            .or_else(|| lookup("LOG_LEVEL"))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_address,
            log_level,
        })
    }
}
