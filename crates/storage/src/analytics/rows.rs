//! Raw result rows as returned by the analytics queries
//!
//! Each query has its own row type, decoded column by column through
//! [`ColumnReader`] so the same decoding runs against driver rows and
//! against the canned rows used by the mock executor.

use crate::error::StorageError;
use serde_json::{Map, Value};

/// Typed access to the columns of one result row
pub trait ColumnReader {
    fn string(&self, column: &str) -> Result<String, StorageError>;
    /// Like [`ColumnReader::string`], but a `null` value decodes to `None`
    fn optional_string(&self, column: &str) -> Result<Option<String>, StorageError>;
    fn integer(&self, column: &str) -> Result<i64, StorageError>;
}

/// A row type that can be decoded from a query result
pub trait GraphRow: Sized {
    fn from_row(row: &dyn ColumnReader) -> Result<Self, StorageError>;
}

impl ColumnReader for neo4rs::Row {
    fn string(&self, column: &str) -> Result<String, StorageError> {
        self.get::<String>(column)
            .map_err(|e| StorageError::row_decode(column, e.to_string()))
    }

    fn optional_string(&self, column: &str) -> Result<Option<String>, StorageError> {
        self.get::<Option<String>>(column)
            .map_err(|e| StorageError::row_decode(column, e.to_string()))
    }

    fn integer(&self, column: &str) -> Result<i64, StorageError> {
        self.get::<i64>(column)
            .map_err(|e| StorageError::row_decode(column, e.to_string()))
    }
}

impl ColumnReader for Map<String, Value> {
    fn string(&self, column: &str) -> Result<String, StorageError> {
        match self.get(column) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(StorageError::row_decode(
                column,
                format!("expected string, found {other}"),
            )),
            None => Err(StorageError::row_decode(column, "missing column")),
        }
    }

    fn optional_string(&self, column: &str) -> Result<Option<String>, StorageError> {
        match self.get(column) {
            Some(Value::Null) => Ok(None),
            _ => self.string(column).map(Some),
        }
    }

    fn integer(&self, column: &str) -> Result<i64, StorageError> {
        match self.get(column) {
            Some(value) => value.as_i64().ok_or_else(|| {
                StorageError::row_decode(column, format!("expected integer, found {value}"))
            }),
            None => Err(StorageError::row_decode(column, "missing column")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCityRow {
    pub city: Option<String>,
}

impl GraphRow for LocationCityRow {
    fn from_row(row: &dyn ColumnReader) -> Result<Self, StorageError> {
        Ok(Self {
            city: row.optional_string("city")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCountryRow {
    pub country: Option<String>,
}

impl GraphRow for LocationCountryRow {
    fn from_row(row: &dyn ColumnReader) -> Result<Self, StorageError> {
        Ok(Self {
            country: row.optional_string("country")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrowthRow {
    pub week: String,
    pub group: String,
    pub members: i64,
}

impl GraphRow for WeeklyGrowthRow {
    fn from_row(row: &dyn ColumnReader) -> Result<Self, StorageError> {
        Ok(Self {
            week: row.string("week")?,
            group: row.string("group")?,
            members: row.integer("members")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyGrowthRow {
    pub month: String,
    pub group: String,
    pub members: i64,
}

impl GraphRow for MonthlyGrowthRow {
    fn from_row(row: &dyn ColumnReader) -> Result<Self, StorageError> {
        Ok(Self {
            month: row.string("month")?,
            group: row.string("group")?,
            members: row.integer("members")?,
        })
    }
}
