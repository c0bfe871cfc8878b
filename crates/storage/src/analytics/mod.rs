//! Analytics queries over the meetup statistics graph
//!
//! The graph holds `Group` nodes with `Location` and `Tag` neighbours, a
//! calendar of `Day` nodes linked by `NEXT` and grouped into `Week` and
//! `Month` nodes, and `Stats` snapshots of member counts per group and day.

mod cypher;
mod params;
mod queries;
mod rows;
mod service;

pub use cypher::{CypherBuilder, CypherQuery, OptionalClause, ParamValue};
pub use params::{day_param, ticks_param};
pub use queries::{
    build_cities, build_countries, build_monthly_growth, build_weekly_growth, city_names,
    country_names, shape_cities, shape_countries, shape_monthly_growth, shape_weekly_growth,
};
pub use rows::{
    ColumnReader, GraphRow, LocationCityRow, LocationCountryRow, MonthlyGrowthRow,
    WeeklyGrowthRow,
};
pub use service::{
    preview, AnalyticsService, Endpoint, CITIES, COUNTRIES, MONTHLY_GROWTH, WEEKLY_GROWTH,
};
