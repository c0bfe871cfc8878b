//! Command-line arguments for the analytics queries

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use groupstats_core::entities::{EndpointKind, GrowthFilter};

/// The four analytics queries, shared by the run and `show-query` commands
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// List the distinct cities of all group locations
    Cities,
    /// List the distinct countries of all group locations
    Countries,
    /// Member counts per group at the start of each week
    WeeklyGrowth(GrowthArgs),
    /// Member counts per group on the first day of each month
    MonthlyGrowth(MonthlyGrowthArgs),
}

impl QueryCommand {
    pub fn kind(&self) -> EndpointKind {
        match self {
            QueryCommand::Cities => EndpointKind::Cities,
            QueryCommand::Countries => EndpointKind::Countries,
            QueryCommand::WeeklyGrowth(_) => EndpointKind::WeeklyGrowth,
            QueryCommand::MonthlyGrowth(_) => EndpointKind::MonthlyGrowth,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GrowthArgs {
    /// First day of the range (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub start: DateTime<Utc>,

    /// Last day of the range (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub end: DateTime<Utc>,

    /// Topic tag a group must carry (repeatable)
    #[arg(long = "topic", value_name = "TOPIC", required = true)]
    pub topics: Vec<String>,

    /// Restrict to this group name (repeatable)
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Restrict to groups located in this city
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MonthlyGrowthArgs {
    #[command(flatten)]
    pub growth: GrowthArgs,

    /// Restrict to groups located in this country
    #[arg(long)]
    pub country: Option<String>,
}

impl GrowthArgs {
    pub fn to_filter(&self) -> GrowthFilter {
        GrowthFilter {
            start_date: self.start,
            end_date: self.end,
            city: self.city.clone(),
            country: None,
            topics: self.topics.clone(),
            groups: self.groups.clone(),
        }
    }
}

impl MonthlyGrowthArgs {
    pub fn to_filter(&self) -> GrowthFilter {
        GrowthFilter {
            country: self.country.clone(),
            ..self.growth.to_filter()
        }
    }
}

/// Parse a date given as `YYYY-MM-DD` (midnight UTC) or RFC 3339
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("invalid date '{value}'"));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid date '{value}': expected YYYY-MM-DD or RFC 3339"))
}
