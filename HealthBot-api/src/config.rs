//! Server configuration read from the environment

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE: &str = "health_bot.db";

/// Environment name used when `APP_ENV` is unset
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default static asset directory, shipped with this crate
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Invalid HOST value: {0}")]
    InvalidHost(String),

    #[error("Invalid REMINDER_BACKEND value: {0} (expected 'database' or 'memory')")]
    InvalidReminderBackend(String),
}

/// Where reminders are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderBackend {
    /// The SQLite `reminders` table
    Database,
    /// A process-local table that is lost on restart
    Memory,
}

impl FromStr for ReminderBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "database" | "db" | "sqlite" => Ok(ReminderBackend::Database),
            "memory" | "in_memory" => Ok(ReminderBackend::Memory),
            _ => Err(ConfigError::InvalidReminderBackend(s.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Deployment environment name reported by `/health`
    pub environment: String,
    pub reminder_backend: ReminderBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            reminder_backend: ReminderBackend::Database,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `DATA_DIR`, `STATIC_DIR`, `APP_ENV` and `REMINDER_BACKEND`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => defaults.port,
        };

        let reminder_backend = match env::var("REMINDER_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.reminder_backend,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            static_dir: env::var("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            reminder_backend,
        })
    }

    /// Address to bind the listener to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// SQLite database path inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}
