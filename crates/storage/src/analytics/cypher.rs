//! Parameterized Cypher query text and its parameter map
//!
//! Queries are assembled line by line. Filters that may be absent are
//! expressed as [`OptionalClause`] values, which carry both the text fragment
//! and the parameter it binds, so a clause can never reference an unbound
//! placeholder and an absent filter never leaves a stray parameter behind.

use neo4rs::{BoltType, Query};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Value bound to a query placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    String(String),
    List(Vec<String>),
    Map(BTreeMap<String, ParamValue>),
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[String]> for ParamValue {
    fn from(value: &[String]) -> Self {
        Self::List(value.to_vec())
    }
}

impl From<ParamValue> for BoltType {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Integer(v) => v.into(),
            ParamValue::String(v) => v.into(),
            ParamValue::List(v) => v.into(),
            ParamValue::Map(entries) => entries
                .into_iter()
                .map(|(key, v)| (key, BoltType::from(v)))
                .collect::<HashMap<String, BoltType>>()
                .into(),
        }
    }
}

/// A built query: Cypher text plus the values for its placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CypherQuery {
    text: String,
    params: BTreeMap<String, ParamValue>,
}

impl CypherQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Names of all `$placeholders` referenced by the query text
    pub fn placeholders(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let bytes = self.text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                if end > start {
                    names.insert(&self.text[start..end]);
                }
                i = end;
            } else {
                i += 1;
            }
        }
        names
    }

    /// Placeholders referenced by the text that have no bound value
    pub fn unbound_placeholders(&self) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !self.params.contains_key(*name))
            .collect()
    }

    /// Convert into a driver query with every parameter attached
    pub fn into_neo4j_query(self) -> Query {
        self.params
            .into_iter()
            .fold(Query::new(self.text), |query, (key, value)| {
                query.param(&key, BoltType::from(value))
            })
    }
}

/// A fragment appended to a line only when its filter value is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalClause {
    fragment: &'static str,
    key: &'static str,
    value: Option<ParamValue>,
}

impl OptionalClause {
    /// `fragment` must reference `$key`; it is emitted only if `value` is `Some`
    pub fn when<V: Into<ParamValue>>(
        fragment: &'static str,
        key: &'static str,
        value: Option<V>,
    ) -> Self {
        Self {
            fragment,
            key,
            value: value.map(Into::into),
        }
    }

    pub fn fragment(&self) -> &'static str {
        self.fragment
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Line-oriented builder for [`CypherQuery`]
#[derive(Debug, Default)]
pub struct CypherBuilder {
    lines: Vec<String>,
    params: BTreeMap<String, ParamValue>,
}

impl CypherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Append `line` followed by each present clause, in the order given
    pub fn line_with(
        mut self,
        line: &str,
        clauses: impl IntoIterator<Item = OptionalClause>,
    ) -> Self {
        let mut text = line.to_string();
        for clause in clauses {
            if let Some(value) = clause.value {
                text.push_str(clause.fragment);
                self.params.insert(clause.key.to_string(), value);
            }
        }
        self.lines.push(text);
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> CypherQuery {
        CypherQuery {
            text: self.lines.join("\n"),
            params: self.params,
        }
    }
}
