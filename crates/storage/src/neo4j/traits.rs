use crate::analytics::{CypherQuery, GraphRow};
use anyhow::Result;
use async_trait::async_trait;
use groupstats_core::QueryOptions;

/// Executes built analytics queries against a graph database
///
/// Implementations run the query text with its parameters, decode every
/// returned row into `R` and hand back the rows in the order the database
/// produced them. A failure anywhere yields an error and no partial result.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    /// Run `query` and decode each result row
    ///
    /// # Arguments
    /// * `query` - Cypher text with its bound parameters
    /// * `options` - Per-call options such as a timeout
    ///
    /// # Returns
    /// * `Result<Vec<R>>` - Decoded rows, or the executor's error
    async fn fetch<R>(&self, query: CypherQuery, options: &QueryOptions) -> Result<Vec<R>>
    where
        R: GraphRow + Send + 'static;
}
