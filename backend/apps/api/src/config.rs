//! Server Configuration
//!
//! Process settings read from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;

use platform::password::{HashAlgorithm, PasswordHashError};
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    HashAlgorithm(#[from] PasswordHashError),
}

/// API server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub pg_dsn: String,
    pub jwt_secret: Vec<u8>,
    pub listen_addr: SocketAddr,
    pub db_max_connections: u32,
    pub hash_algorithm: HashAlgorithm,
    pub frontend_origins: Vec<String>,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("pg_dsn", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("listen_addr", &self.listen_addr)
            .field("db_max_connections", &self.db_max_connections)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("frontend_origins", &self.frontend_origins)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let pg_dsn = required("PG_DSN")?;
        let jwt_secret = required("JWT_SECRET")?.into_bytes();

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "LISTEN_ADDR",
                reason: e.to_string(),
            })?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    name: "DB_MAX_CONNECTIONS",
                    reason: e.to_string(),
                })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let hash_algorithm = match lookup("PASSWORD_HASH_ALGORITHM") {
            Some(value) => value.parse()?,
            None => HashAlgorithm::default(),
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "COOKIE_SECURE",
                reason: format!("expected true or false, got {value:?}"),
            })?,
            None => true,
        };

        Ok(Self {
            pg_dsn,
            jwt_secret,
            listen_addr,
            db_max_connections,
            hash_algorithm,
            frontend_origins,
            cookie_secure,
        })
    }
}
