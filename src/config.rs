//! Runtime configuration read from the environment (after `.env`, see the server binary).

use crate::error::ConfigError;
use crate::problem::ProblemSettings;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_OWNER: &str = "weaverryan";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// PostgreSQL URL. Without one the server keeps programmers in memory.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub debug: bool,
    pub problem_type_base_url: Option<String>,
    /// Username that owns every created programmer.
    pub default_owner: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let debug = match non_empty("APP_DEBUG") {
            Some(v) => parse_bool("APP_DEBUG", &v)?,
            None => false,
        };

        let max_connections: u32 = match non_empty("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(AppConfig {
            database_url: non_empty("DATABASE_URL"),
            bind_addr,
            debug,
            problem_type_base_url: non_empty("PROBLEM_TYPE_BASE_URL"),
            default_owner: non_empty("DEFAULT_OWNER").unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            max_connections,
        })
    }

    pub fn problem_settings(&self) -> ProblemSettings {
        ProblemSettings {
            debug: self.debug,
            type_base_url: self.problem_type_base_url.clone(),
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}
