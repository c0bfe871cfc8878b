use crate::analytics::AnalyticsService;
use crate::error::StorageError;
use crate::neo4j::Neo4jClient;
use groupstats_core::{config::StorageConfig, Error};
use std::sync::Arc;

/// Creates a Neo4j client from configuration.
///
/// The returned client owns the driver's connection pool and can be shared
/// across tasks.
///
/// # Arguments
/// * `config` - Storage configuration with the Neo4j connection details
///
/// # Errors
/// Returns an error if the driver configuration is invalid or the server
/// cannot be reached
///
/// # Example
/// ```ignore
/// let config = StorageConfig::default();
/// let client = create_neo4j_client(&config).await?;
/// ```
pub async fn create_neo4j_client(config: &StorageConfig) -> Result<Arc<Neo4jClient>, Error> {
    let client = Neo4jClient::new(config)
        .await
        .map_err(|e| match e.downcast::<StorageError>() {
            Ok(storage_err) => Error::from(storage_err),
            Err(other) => Error::Other(other),
        })?;
    Ok(Arc::new(client))
}

/// Creates an analytics service backed by a new Neo4j client.
///
/// Equivalent to calling `create_neo4j_client()` and wrapping the client in
/// an [`AnalyticsService`].
///
/// # Errors
/// Returns an error if the client cannot be created
pub async fn create_analytics_service(
    config: &StorageConfig,
) -> Result<AnalyticsService<Neo4jClient>, Error> {
    let client = create_neo4j_client(config).await?;
    Ok(AnalyticsService::new(client))
}
