//! Mock graph executor for testing

use super::traits::GraphExecutor;
use crate::analytics::{CypherQuery, GraphRow};
use crate::error::StorageError;
use anyhow::Result;
use async_trait::async_trait;
use groupstats_core::QueryOptions;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Canned rows served for queries whose text contains `marker`
#[derive(Debug, Clone)]
struct CannedResult {
    marker: String,
    rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Default)]
struct MockData {
    results: Vec<CannedResult>,
    failure: Option<String>,
    executed: Vec<CypherQuery>,
}

/// Mock executor answering queries from canned JSON rows
///
/// The first registered marker found in the query text selects the rows;
/// a query matching no marker returns no rows. Every query is recorded,
/// including ones that fail.
#[derive(Clone, Default)]
pub struct MockGraphExecutor {
    data: Arc<Mutex<MockData>>,
}

impl MockGraphExecutor {
    /// Create a new mock executor with no canned rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `rows` for any query whose text contains `marker`
    ///
    /// Values that are not JSON objects are served as empty rows, which fail
    /// to decode like a row with missing columns would.
    pub fn with_rows(self, marker: impl Into<String>, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(map) => map,
                _ => Map::new(),
            })
            .collect();
        self.lock().results.push(CannedResult {
            marker: marker.into(),
            rows,
        });
        self
    }

    /// Fail every query with a `QueryFailed` error carrying `message`
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.lock().failure = Some(message.into());
        self
    }

    /// Queries received so far, in order
    pub fn executed_queries(&self) -> Vec<CypherQuery> {
        self.lock().executed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockData> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GraphExecutor for MockGraphExecutor {
    async fn fetch<R>(&self, query: CypherQuery, _options: &QueryOptions) -> Result<Vec<R>>
    where
        R: GraphRow + Send + 'static,
    {
        let mut data = self.lock();
        data.executed.push(query.clone());

        if let Some(message) = &data.failure {
            return Err(StorageError::QueryFailed(message.clone()).into());
        }

        let rows = data
            .results
            .iter()
            .find(|canned| query.text().contains(canned.marker.as_str()))
            .map(|canned| canned.rows.as_slice())
            .unwrap_or_default();

        let decoded = rows
            .iter()
            .map(|row| R::from_row(row))
            .collect::<Result<Vec<R>, StorageError>>()?;

        Ok(decoded)
    }
}
