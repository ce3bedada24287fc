//! Startup settings from the environment: port, environment name, CORS allow-list, database, resources file.

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://contacts.db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    /// No cross-origin access.
    Disabled,
    Any,
    List(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub port: u16,
    pub environment: String,
    pub cors_origins: CorsOrigins,
    pub database_url: String,
    /// JSON file with resource declarations; `None` uses the built-in contacts model.
    pub resources_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: DEFAULT_PORT,
            environment: "development".into(),
            cors_origins: CorsOrigins::Disabled,
            database_url: DEFAULT_DATABASE_URL.into(),
            resources_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();

        let port = match get("PORT") {
            Some(p) => p.parse::<u16>().map_err(|e| ConfigError::Setting {
                name: "PORT",
                reason: format!("'{}': {}", p, e),
            })?,
            None => defaults.port,
        };

        Ok(Settings {
            port,
            environment: get("APP_ENV").unwrap_or(defaults.environment),
            cors_origins: get("CORS_ORIGINS")
                .map(|v| parse_cors_origins(&v))
                .unwrap_or(defaults.cors_origins),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            resources_path: get("RESOURCES_PATH").map(PathBuf::from),
        })
    }
}

fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else if origins.is_empty() {
        CorsOrigins::Disabled
    } else {
        CorsOrigins::List(origins)
    }
}
