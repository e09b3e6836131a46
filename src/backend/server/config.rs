/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables,
 * with defaults suitable for local development.
 *
 * # Variables
 *
 * | Variable                   | Default     |
 * |----------------------------|-------------|
 * | `SERVER_PORT`              | `4000`      |
 * | `DATABASE_URL`             | unset       |
 * | `DATABASE_MAX_CONNECTIONS` | `5`         |
 * | `JWT_SECRET`               | dev secret  |
 * | `JWT_EXPIRES_IN`           | `2592000`   |
 * | `BCRYPT_COST`              | `12`        |
 *
 * Without `DATABASE_URL` the server keeps everything in memory. A value
 * that is present but does not parse stops startup.
 */
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::backend::auth::sessions::{AuthConfig, DEFAULT_TOKEN_TTL_SECS};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const DEV_JWT_SECRET: &str = "recipebook-development-secret";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "SERVER_PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let token_ttl_secs = parse_or(&lookup, "JWT_EXPIRES_IN", DEFAULT_TOKEN_TTL_SECS)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
        }

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set. Using the development secret.");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            port,
            database_url,
            max_connections,
            auth: AuthConfig {
                jwt_secret,
                token_ttl_secs,
                bcrypt_cost,
            },
        })
    }

    /// Listen address (all interfaces)
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
