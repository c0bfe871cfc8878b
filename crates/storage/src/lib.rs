//! Neo4j-backed analytics queries for groupstats
//!
//! Query builders and result shapers live in [`analytics`]; [`neo4j`]
//! provides the executor that runs them. Most callers only need
//! [`create_analytics_service`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod analytics;
pub mod error;
mod factory;
pub mod neo4j;

// Export factory functions
pub use factory::{create_analytics_service, create_neo4j_client};

pub use analytics::{AnalyticsService, CypherQuery, Endpoint, GraphRow};
pub use error::StorageError;
pub use neo4j::{GraphExecutor, MockGraphExecutor, Neo4jClient};
