//! Configuration module for groupstats
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.groupstats/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".groupstats").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the Neo4j connection
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Neo4j host address
    #[serde(default = "default_neo4j_host")]
    pub neo4j_host: String,

    /// Neo4j Bolt port (driver connection)
    #[serde(default = "default_neo4j_bolt_port")]
    pub neo4j_bolt_port: u16,

    /// Neo4j username
    #[serde(default = "default_neo4j_user")]
    pub neo4j_user: String,

    /// Neo4j password
    #[serde(default = "default_neo4j_password")]
    pub neo4j_password: String,

    /// Database to query; the server default when unset
    #[serde(default)]
    pub neo4j_database: Option<String>,

    /// Size of the driver connection pool
    #[serde(default = "default_neo4j_max_connections")]
    pub neo4j_max_connections: usize,

    /// Rows pulled from the server per fetch
    #[serde(default = "default_neo4j_fetch_size")]
    pub neo4j_fetch_size: usize,

    /// Default per-query timeout in milliseconds (0 disables it)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            neo4j_host: default_neo4j_host(),
            neo4j_bolt_port: default_neo4j_bolt_port(),
            neo4j_user: default_neo4j_user(),
            neo4j_password: default_neo4j_password(),
            neo4j_database: None,
            neo4j_max_connections: default_neo4j_max_connections(),
            neo4j_fetch_size: default_neo4j_fetch_size(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("neo4j_host", &self.neo4j_host)
            .field("neo4j_bolt_port", &self.neo4j_bolt_port)
            .field("neo4j_user", &self.neo4j_user)
            .field("neo4j_password", &"***REDACTED***")
            .field("neo4j_database", &self.neo4j_database)
            .field("neo4j_max_connections", &self.neo4j_max_connections)
            .field("neo4j_fetch_size", &self.neo4j_fetch_size)
            .field("query_timeout_ms", &self.query_timeout_ms)
            .finish()
    }
}

impl StorageConfig {
    /// Bolt URI for the configured host and port
    pub fn bolt_uri(&self) -> String {
        format!("bolt://{}:{}", self.neo4j_host, self.neo4j_bolt_port)
    }

    /// Default query timeout, `None` when disabled
    pub fn query_timeout(&self) -> Option<Duration> {
        if self.query_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.query_timeout_ms))
        }
    }
}

impl Config {
    /// Check values that would otherwise only fail at connection time
    pub fn validate(&self) -> Result<()> {
        let storage = &self.storage;

        if storage.neo4j_host.trim().is_empty() {
            return Err(Error::config("storage.neo4j_host must not be empty"));
        }
        if storage.neo4j_bolt_port == 0 {
            return Err(Error::config("storage.neo4j_bolt_port must be non-zero"));
        }
        if storage.neo4j_max_connections == 0 {
            return Err(Error::config(
                "storage.neo4j_max_connections must be at least 1",
            ));
        }
        if storage.neo4j_fetch_size == 0 {
            return Err(Error::config("storage.neo4j_fetch_size must be at least 1"));
        }
        if matches!(storage.neo4j_database.as_deref(), Some(db) if db.trim().is_empty()) {
            return Err(Error::config(
                "storage.neo4j_database must not be empty when set",
            ));
        }

        Ok(())
    }
}
