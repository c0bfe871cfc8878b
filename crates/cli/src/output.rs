use anyhow::{Context, Result};
use groupstats_core::EndpointKind;
use groupstats_storage::CypherQuery;
use serde::Serialize;

/// A query as it would be sent, printed by `show-query`
#[derive(Debug, Serialize)]
pub struct QueryPreview<'a> {
    pub endpoint: EndpointKind,
    #[serde(flatten)]
    pub query: &'a CypherQuery,
}

/// Pretty-printed JSON for stdout
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
