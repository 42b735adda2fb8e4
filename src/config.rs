//! Process configuration from environment variables (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// PostgreSQL URL. Without one the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
    pub route_prefix: String,
    pub seed_settings: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let route_prefix = get("ROUTE_PREFIX").unwrap_or("/admin").trim_end_matches('/').to_string();
        if !route_prefix.is_empty() && !route_prefix.starts_with('/') {
            return Err(ConfigError::Invalid {
                var: "ROUTE_PREFIX",
                reason: "must start with '/'".into(),
            });
        }
        let max_connections: u32 = parse(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        Ok(AppConfig {
            database_url: get("DATABASE_URL").map(str::to_string),
            bind_addr: parse(get("BIND_ADDR"), "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            max_connections,
            body_limit: parse(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", 1024 * 1024)?,
            route_prefix,
            seed_settings: parse_bool(get("SEED_SETTINGS"), "SEED_SETTINGS")?,
        })
    }
}

fn parse<T>(raw: Option<&str>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(raw: Option<&str>, var: &'static str) -> Result<bool, ConfigError> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
