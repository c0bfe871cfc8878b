use super::traits::GraphExecutor;
use crate::analytics::{CypherQuery, GraphRow};
use crate::error::StorageError;
use anyhow::Result;
use async_trait::async_trait;
use groupstats_core::{QueryOptions, StorageConfig};
use neo4rs::{ConfigBuilder, Graph};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Neo4j client executing analytics queries over a pooled Bolt connection
pub struct Neo4jClient {
    graph: Arc<Graph>,
    default_timeout: Option<Duration>,
}

impl Neo4jClient {
    /// Connect to Neo4j server with the provided configuration
    ///
    /// # Arguments
    /// * `config` - Storage configuration containing Neo4j connection details
    ///
    /// # Returns
    /// * `Result<Self>` - Connected Neo4j client or error
    ///
    /// # Example
    /// ```no_run
    /// use groupstats_storage::Neo4jClient;
    /// use groupstats_core::StorageConfig;
    ///
    /// # async fn example(config: &StorageConfig) -> anyhow::Result<()> {
    /// let client = Neo4jClient::new(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let uri = config.bolt_uri();

        info!("Connecting to Neo4j at {}", uri);

        let mut builder = ConfigBuilder::default()
            .uri(uri.as_str())
            .user(config.neo4j_user.as_str())
            .password(config.neo4j_password.as_str())
            .fetch_size(config.neo4j_fetch_size)
            .max_connections(config.neo4j_max_connections);
        if let Some(database) = config.neo4j_database.as_deref() {
            builder = builder.db(database);
        }
        let driver_config = builder
            .build()
            .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

        let graph = Graph::connect(driver_config)
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("{uri}: {e}")))?;

        Ok(Self {
            graph: Arc::new(graph),
            default_timeout: config.query_timeout(),
        })
    }

    /// Get a reference to the underlying Graph for direct query execution
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    async fn collect_rows<R>(&self, query: CypherQuery) -> Result<Vec<R>, StorageError>
    where
        R: GraphRow,
    {
        let mut result = self
            .graph
            .execute(query.into_neo4j_query())
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
        {
            rows.push(R::from_row(&row)?);
        }

        Ok(rows)
    }
}

#[async_trait]
impl GraphExecutor for Neo4jClient {
    async fn fetch<R>(&self, query: CypherQuery, options: &QueryOptions) -> Result<Vec<R>>
    where
        R: GraphRow + Send + 'static,
    {
        let rows = match options.timeout.or(self.default_timeout) {
            Some(limit) => {
                debug!("Running query with {}ms timeout", limit.as_millis());
                tokio::time::timeout(limit, self.collect_rows(query))
                    .await
                    .map_err(|_| StorageError::Timeout(timeout_millis(limit)))??
            }
            None => self.collect_rows(query).await?,
        };

        Ok(rows)
    }
}

/// Whole milliseconds of a timeout, saturating at `u64::MAX`
fn timeout_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}
