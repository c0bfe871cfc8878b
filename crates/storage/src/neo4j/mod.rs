//! Neo4j executor for the analytics queries

pub(crate) mod client;
pub(crate) mod mock;
pub(crate) mod traits;

pub use client::Neo4jClient;
pub use mock::MockGraphExecutor;
pub use traits::GraphExecutor;
