//! Test utilities for storage layer integration tests

use groupstats_core::config::{Config, StorageConfig};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage config for a live Neo4j, honouring the `NEO4J_*` variables
///
/// Falls back to the built-in defaults (`bolt://localhost:7687`) when no
/// variables are set.
#[allow(dead_code)]
pub fn live_storage_config() -> StorageConfig {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    Config::from_file(&dir.path().join("absent.toml"))
        .expect("Failed to load config from environment")
        .storage
}

/// Marker stored on every node a test creates, so cleanup can find them
#[allow(dead_code)]
pub fn unique_run_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{prefix}_{}_{nanos}", std::process::id())
}

/// Calendar year no other test data is likely to occupy
#[allow(dead_code)]
pub fn unique_year(offset: i32) -> i32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    3000 + offset + (nanos % 2000) as i32 * 2
}
