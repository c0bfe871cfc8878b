//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::defaults::*;
use super::{global_config_path, Config};

type Builder = LibConfigBuilder<config::builder::DefaultState>;

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: Builder,
    key: &str,
    value: T,
) -> Result<Builder> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

/// Apply a string override from a plain environment variable, if set
fn override_from_env(builder: Builder, var: &str, key: &str) -> Result<Builder> {
    match std::env::var(var) {
        Ok(value) => builder
            .set_override(key, value)
            .map_err(|e| Error::config(format!("Failed to set {var}: {e}"))),
        Err(_) => Ok(builder),
    }
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `GROUPSTATS_` and use double underscores
    /// for nested values. For example:
    /// - `GROUPSTATS_STORAGE__NEO4J_HOST=graph.internal`
    ///
    /// The driver-style `NEO4J_HOST`, `NEO4J_BOLT_PORT`, `NEO4J_USER`,
    /// `NEO4J_PASSWORD` and `NEO4J_DATABASE` variables are honored last.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // Section defaults (config crate doesn't apply serde defaults for missing sections)
        let builder = set_config_default(builder, "storage.neo4j_host", default_neo4j_host())?;
        let builder = set_config_default(
            builder,
            "storage.neo4j_bolt_port",
            default_neo4j_bolt_port() as i64,
        )?;
        let builder = set_config_default(builder, "storage.neo4j_user", default_neo4j_user())?;
        let builder =
            set_config_default(builder, "storage.neo4j_password", default_neo4j_password())?;
        let builder = set_config_default(
            builder,
            "storage.neo4j_max_connections",
            default_neo4j_max_connections() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "storage.neo4j_fetch_size",
            default_neo4j_fetch_size() as i64,
        )?;
        let mut builder = set_config_default(
            builder,
            "storage.query_timeout_ms",
            default_query_timeout_ms() as i64,
        )?;

        // Add the config file if it exists
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        } else {
            debug!(
                "No configuration file at {}, using defaults and environment",
                path.display()
            );
        }

        // Add environment variables with GROUPSTATS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("GROUPSTATS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Neo4j driver-style variables
        builder = override_from_env(builder, "NEO4J_HOST", "storage.neo4j_host")?;
        if let Ok(port) = std::env::var("NEO4J_BOLT_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                builder = builder
                    .set_override("storage.neo4j_bolt_port", port_num as i64)
                    .map_err(|e| Error::config(format!("Failed to set NEO4J_BOLT_PORT: {e}")))?;
            }
        }
        builder = override_from_env(builder, "NEO4J_USER", "storage.neo4j_user")?;
        builder = override_from_env(builder, "NEO4J_PASSWORD", "storage.neo4j_password")?;
        builder = override_from_env(builder, "NEO4J_DATABASE", "storage.neo4j_database")?;

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.groupstats/config.toml or custom --config path)
    /// 3. Environment variables (GROUPSTATS_*, then NEO4J_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
