// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Directory holding the database file or the JSON containers | `data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `STORAGE_BACKEND` | `database` (redb) or `json` (one file per kind) | `database` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `TRAINER_CACHE_TTL_SECS` | Lifetime of the cached trainer list | `300` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::paths::DATA_ROOT;
use crate::storage::DEFAULT_LIST_TTL;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name selecting the storage backend.
pub const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Environment variable name for the trainer list cache lifetime, in seconds.
pub const TRAINER_CACHE_TTL_ENV: &str = "TRAINER_CACHE_TTL_SECS";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Which persistence backend serves the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Database,
    Json,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "redb" => Ok(Self::Database),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `database` or `json`, got `{other}`")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => f.write_str("database"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub log_format: LogFormat,
    pub trainer_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_ROOT),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_backend: StorageBackend::default(),
            log_format: LogFormat::default(),
            trainer_cache_ttl: DEFAULT_LIST_TTL,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables. Unset or blank values fall back
    /// to the defaults; malformed values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(host) = get(HOST_ENV) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(PORT_ENV, &port, e))?;
        }
        if let Some(backend) = get(STORAGE_BACKEND_ENV) {
            config.storage_backend = backend
                .parse()
                .map_err(|e| ConfigError::invalid(STORAGE_BACKEND_ENV, &backend, e))?;
        }
        if let Some(format) = get(LOG_FORMAT_ENV) {
            config.log_format = format
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_ENV, &format, e))?;
        }
        if let Some(ttl) = get(TRAINER_CACHE_TTL_ENV) {
            let secs: u64 = ttl
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(TRAINER_CACHE_TTL_ENV, &ttl, e))?;
            config.trainer_cache_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| ConfigError::invalid(HOST_ENV, &self.host, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.storage_backend, StorageBackend::Database);
        assert_eq!(config.trainer_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = load(&[
            ("DATA_DIR", "/var/lib/gym"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("STORAGE_BACKEND", "JSON"),
            ("LOG_FORMAT", "json"),
            ("TRAINER_CACHE_TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/gym"));
        assert_eq!(config.storage_backend, StorageBackend::Json);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.trainer_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("PORT", "  "), ("STORAGE_BACKEND", "")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage_backend, StorageBackend::Database);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

        let err = load(&[("STORAGE_BACKEND", "sqlite")]).unwrap_err();
        assert!(err.to_string().contains("STORAGE_BACKEND"));

        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
        assert!(load(&[("TRAINER_CACHE_TTL_SECS", "-5")]).is_err());
    }

    #[test]
    fn bad_host_fails_bind_addr() {
        let config = load(&[("HOST", "not a host")]).unwrap();
        assert!(config.bind_addr().is_err());
    }
}
