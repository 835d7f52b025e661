use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::FeedError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    /// Single origin allowed to read the feed; permissive CORS when unset.
    pub cors_allow_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "sqlite://actions.db?mode=rwc".to_string(),
            database_max_connections: 5,
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            cors_allow_origin: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, FeedError> {
        let defaults = AppConfig::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let database_max_connections =
            parse_var("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = parse_var("SERVER_PORT", defaults.server_port)?;

        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty());

        Ok(AppConfig {
            database_url,
            database_max_connections,
            server_host,
            server_port,
            cors_allow_origin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, FeedError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| FeedError::ConfigError(format!("{} must be a number: {}", name, e))),
        Err(_) => Ok(default),
    }
}
