//! Library interface for the groupstats CLI
//!
//! Argument types and output rendering live here so integration tests can
//! exercise them without running the binary.

pub mod args;
pub mod output;

pub use args::{parse_date, GrowthArgs, MonthlyGrowthArgs, QueryCommand};
pub use output::{render_json, QueryPreview};
