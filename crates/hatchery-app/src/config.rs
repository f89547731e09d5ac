//! Configuration for the Hatchery binary.
//!
//! All configuration is loaded from environment variables. Generation
//! backend variables are read by [`GeneratorConfig::from_env`].

use std::time::Duration;

use hatchery_genai::GeneratorConfig;
use hatchery_server::ServerConfig;
use hatchery_store::SqliteConfig;

use crate::error::LaunchError;

/// Default database location, relative to the working directory.
const DEFAULT_DATABASE_URL: &str = "sqlite://hatchery.db";

/// Tokens granted to a brand new wallet.
const DEFAULT_STARTING_BALANCE: u64 = 100;

/// Seconds to wait for a database connection.
const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 5;

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Local database settings.
    pub store: SqliteConfig,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Generation backends.
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `HATCHERY_DATABASE_URL` -- `SQLite` URL (default `sqlite://hatchery.db`)
    /// - `HATCHERY_DATABASE_TIMEOUT_SECS` -- connection wait (default 5)
    /// - `HATCHERY_STARTING_BALANCE` -- balance of a new wallet (default 100)
    /// - `HATCHERY_HOST` -- bind address (default `127.0.0.1`)
    /// - `HATCHERY_PORT` -- bind port (default 8080)
    ///
    /// Plus the `LLM_TEXT_*` and `LLM_IMAGE_*` variables documented on
    /// [`GeneratorConfig::from_env`].
    pub fn from_env() -> Result<Self, LaunchError> {
        let database_url = std::env::var("HATCHERY_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let timeout_secs: u64 = parse_or(
            "HATCHERY_DATABASE_TIMEOUT_SECS",
            std::env::var("HATCHERY_DATABASE_TIMEOUT_SECS").ok(),
            DEFAULT_DATABASE_TIMEOUT_SECS,
        )?;

        let starting_balance: u64 = parse_or(
            "HATCHERY_STARTING_BALANCE",
            std::env::var("HATCHERY_STARTING_BALANCE").ok(),
            DEFAULT_STARTING_BALANCE,
        )?;

        let defaults = ServerConfig::default();
        let host = std::env::var("HATCHERY_HOST").unwrap_or(defaults.host);
        let port: u16 = parse_or("HATCHERY_PORT", std::env::var("HATCHERY_PORT").ok(), defaults.port)?;

        let generator = GeneratorConfig::from_env()?;

        Ok(Self {
            store: SqliteConfig::new(&database_url)
                .with_connect_timeout(Duration::from_secs(timeout_secs))
                .with_starting_balance(starting_balance),
            server: ServerConfig { host, port },
            generator,
        })
    }
}

/// Parse an optional raw value, falling back to `default` when unset.
fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T, LaunchError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e| LaunchError::Config(format!("invalid {name}: {e}")))
    })
}
