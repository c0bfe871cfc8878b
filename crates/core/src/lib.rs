//! Core types for the groupstats analytics layer
//!
//! This crate provides the foundational pieces shared by the storage layer
//! and the command-line front end:
//!
//! - **Entities**: filter criteria, per-call options, and output records
//! - **Calendar**: tick conversion and day keys used by the growth queries
//! - **Configuration**: Neo4j connection and query settings
//! - **Error handling**: Unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod calendar;
pub mod config;
pub mod entities;
pub mod error;

// Re-export main types for convenience
pub use calendar::{to_ticks, DayKey, TICKS_AT_UNIX_EPOCH, TICKS_PER_MILLISECOND};
pub use config::{Config, StorageConfig};
pub use entities::{
    City, Country, EndpointKind, GrowthFilter, GrowthFilterBuilder, LookupFilter, MonthlyGrowth,
    QueryOptions, WeeklyGrowth,
};
pub use error::{Error, Result};

