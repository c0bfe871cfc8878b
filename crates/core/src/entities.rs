use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumString};

/// Analytics endpoint served by the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EndpointKind {
    WeeklyGrowth,
    MonthlyGrowth,
    Cities,
    Countries,
}

/// Filter criteria for the weekly and monthly growth queries
///
/// `city`, `country` and `groups` narrow the result only when present and
/// non-empty. `topics` is always applied: a group must carry one of the tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GrowthFilter {
    /// Lower bound of the date range
    pub start_date: DateTime<Utc>,

    /// Upper bound of the date range
    pub end_date: DateTime<Utc>,

    /// Restrict to groups located in this city
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub city: Option<String>,

    /// Restrict to groups located in this country (monthly growth only)
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub country: Option<String>,

    /// Topic tags a group must carry
    pub topics: Vec<String>,

    /// Restrict to these group names when non-empty
    #[serde(default)]
    #[builder(default = "Vec::new()")]
    pub groups: Vec<String>,
}

impl GrowthFilter {
    /// City to filter on, if one was given
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.is_empty())
    }

    /// Country to filter on, if one was given
    pub fn country_filter(&self) -> Option<&str> {
        self.country.as_deref().filter(|country| !country.is_empty())
    }

    /// Group names to filter on, if any were given
    pub fn group_filter(&self) -> Option<&[String]> {
        if self.groups.is_empty() {
            None
        } else {
            Some(&self.groups)
        }
    }
}

/// Parameters for the city and country lookups, which take no filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFilter {}

/// Per-call options handed through to the executor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Abort the query after this long; `None` uses the executor's default
    pub timeout: Option<Duration>,
}

impl QueryOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

// ==== Output records ====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// `None` for locations stored without a city
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country: Option<String>,
}

/// Member count of one group at the start of one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGrowth {
    /// `month/day` of the first day of the week
    pub week: String,
    pub group: String,
    pub members: i64,
}

/// Member count of one group on the first day of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGrowth {
    /// `month/day/year` of the first day of the month
    pub month: String,
    pub group: String,
    pub members: i64,
}
