//! Query builders and result shapers for the analytics endpoints
//!
//! Builders map filter criteria to a [`CypherQuery`]; shapers map decoded
//! rows to output records. Both are pure. Shapers are positional: output `i`
//! is derived from row `i` only, with no reordering, deduplication or
//! filtering.

use super::cypher::{CypherBuilder, CypherQuery, OptionalClause};
use super::params::{day_param, ticks_param};
use super::rows::{LocationCityRow, LocationCountryRow, MonthlyGrowthRow, WeeklyGrowthRow};
use groupstats_core::entities::{
    City, Country, GrowthFilter, LookupFilter, MonthlyGrowth, WeeklyGrowth,
};

pub(crate) const WEEKLY_CITY_CLAUSE: &str = " AND location.city = $city";
pub(crate) const WEEKLY_GROUPS_CLAUSE: &str = " AND group.name in $groups";
pub(crate) const MONTHLY_CITY_CLAUSE: &str = " AND location.city = $city";
pub(crate) const MONTHLY_COUNTRY_CLAUSE: &str = " AND location.country = $country";
pub(crate) const MONTHLY_GROUPS_CLAUSE: &str = " WHERE group.name in $groups";

// ==== Builders ====

/// Member counts per group at the start of each week between two days
///
/// Walks the `NEXT` chain from the start day to the end day (inclusive),
/// collects the weeks those days belong to, and for every week and group
/// keeps the first day of the week and the stats snapshot taken on it. That
/// day may fall before the start day. Topic tags are
/// always required; city and group names narrow the result when given.
pub fn build_weekly_growth(filter: &GrowthFilter) -> CypherQuery {
    CypherBuilder::new()
        .line("MATCH (dayStart:Day { day: $startDate.day, month: $startDate.month, year: $startDate.year }),")
        .line("      (dayEnd:Day { day: $endDate.day, month: $endDate.month, year: $endDate.year })")
        .line("MATCH (dayStart)-[:NEXT*0..]->(day:Day)-[:NEXT*0..]->(dayEnd),")
        .line("      (day)<-[:HAS_DAY]-(week:Week)")
        .line("WITH DISTINCT week")
        .line("MATCH (week)-[:HAS_DAY]->(day)<-[:ON_DAY]-(stats:Stats)<-[:HAS_MEMBERS]-(group:Group)-[:LOCATED_IN]->(location:Location),")
        .line("      (group)-[:HAS_TAG]->(tag:Tag)")
        .line_with(
            "WHERE tag.tag in $topics",
            [
                OptionalClause::when(WEEKLY_CITY_CLAUSE, "city", filter.city_filter()),
                OptionalClause::when(WEEKLY_GROUPS_CLAUSE, "groups", filter.group_filter()),
            ],
        )
        .line("WITH day, week, group, stats")
        .line("ORDER BY day.timestamp")
        .line("WITH week, head(collect(day)) as day, group, head(collect(stats)) as members")
        .line("WITH DISTINCT (day.month + \"/\" + day.day) as week, group.name as group, members.count as members, day")
        .line("ORDER BY day.timestamp")
        .line("RETURN week, group, members")
        .param("startDate", day_param(&filter.start_date))
        .param("endDate", day_param(&filter.end_date))
        .param("topics", filter.topics.clone())
        .build()
}

/// Member counts per group on the first day of each month in a tick range
///
/// Months qualify when one of their days has a timestamp strictly between
/// the start and end ticks. Groups must carry a topic tag; city, country and
/// group names narrow the result when given.
pub fn build_monthly_growth(filter: &GrowthFilter) -> CypherQuery {
    CypherBuilder::new()
        .line("MATCH (d:Day)<-[:HAS_DAY]-(month:Month)")
        .line("WHERE d.timestamp > $startDate AND d.timestamp < $endDate")
        .line("WITH DISTINCT month")
        .line("MATCH (month:Month)-[:HAS_DAY]->(day:Day { day: 1 })")
        .line("MATCH (tag:Tag), (location:Location)")
        .line_with(
            "WHERE tag.tag in $topics",
            [
                OptionalClause::when(MONTHLY_CITY_CLAUSE, "city", filter.city_filter()),
                OptionalClause::when(MONTHLY_COUNTRY_CLAUSE, "country", filter.country_filter()),
            ],
        )
        .line("WITH tag, location, day")
        .line("MATCH (tag)-[:HAS_TAG]-(group:Group),")
        .line("      (group)-[:LOCATED_IN]->(location),")
        .line_with(
            "      (group)-[:HAS_MEMBERS]->(stats:Stats)-[:ON_DAY]->(day)",
            [OptionalClause::when(
                MONTHLY_GROUPS_CLAUSE,
                "groups",
                filter.group_filter(),
            )],
        )
        .line("WITH DISTINCT (day.month + \"/\" + day.day + \"/\" + day.year) as month, group.name as group, stats.count as members, day")
        .line("ORDER BY day.timestamp")
        .line("RETURN month, group, members")
        .param("startDate", ticks_param(&filter.start_date))
        .param("endDate", ticks_param(&filter.end_date))
        .param("topics", filter.topics.clone())
        .build()
}

/// Distinct city values across all locations
pub fn build_cities(_filter: &LookupFilter) -> CypherQuery {
    CypherBuilder::new()
        .line("MATCH (location:Location)")
        .line("RETURN DISTINCT location.city as city")
        .build()
}

/// Distinct country values across all locations
pub fn build_countries(_filter: &LookupFilter) -> CypherQuery {
    CypherBuilder::new()
        .line("MATCH (location:Location)")
        .line("RETURN DISTINCT location.country as country")
        .build()
}

// ==== Shapers ====

pub fn shape_cities(rows: Vec<LocationCityRow>) -> Vec<City> {
    rows.into_iter().map(|row| City { city: row.city }).collect()
}

pub fn shape_countries(rows: Vec<LocationCountryRow>) -> Vec<Country> {
    rows.into_iter()
        .map(|row| Country {
            country: row.country,
        })
        .collect()
}

pub fn shape_weekly_growth(rows: Vec<WeeklyGrowthRow>) -> Vec<WeeklyGrowth> {
    rows.into_iter()
        .map(|row| WeeklyGrowth {
            week: row.week,
            group: row.group,
            members: row.members,
        })
        .collect()
}

pub fn shape_monthly_growth(rows: Vec<MonthlyGrowthRow>) -> Vec<MonthlyGrowth> {
    rows.into_iter()
        .map(|row| MonthlyGrowth {
            month: row.month,
            group: row.group,
            members: row.members,
        })
        .collect()
}

/// Flat list of city values, in record order; `None` keeps a missing city
pub fn city_names(cities: &[City]) -> Vec<Option<&str>> {
    cities.iter().map(|c| c.city.as_deref()).collect()
}

/// Flat list of country values, in record order
pub fn country_names(countries: &[Country]) -> Vec<Option<&str>> {
    countries.iter().map(|c| c.country.as_deref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::cypher::ParamValue;
    use chrono::{DateTime, TimeZone, Utc};
    use groupstats_core::entities::GrowthFilterBuilder;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    fn base_filter() -> GrowthFilterBuilder {
        let mut builder = GrowthFilterBuilder::default();
        builder
            .start_date(date(2024, 1, 1))
            .end_date(date(2024, 1, 14))
            .topics(vec!["tech".to_string()]);
        builder
    }

    fn assert_params_cover_text(query: &CypherQuery) {
        assert!(
            query.unbound_placeholders().is_empty(),
            "unbound placeholders {:?} in:\n{}",
            query.unbound_placeholders(),
            query.text()
        );
        for key in query.params().keys() {
            assert!(
                query.placeholders().contains(key.as_str()),
                "parameter {key} is bound but never referenced"
            );
        }
    }

    fn weekly_row(week: &str, group: &str, members: i64) -> WeeklyGrowthRow {
        WeeklyGrowthRow {
            week: week.to_string(),
            group: group.to_string(),
            members,
        }
    }

    // ---- weekly builder ----

    #[test]
    fn test_weekly_includes_city_clause_only_when_city_given() {
        let with_city = build_weekly_growth(&base_filter().city("Austin").build().expect("filter"));
        assert!(with_city.text().contains("location.city = $city"));
        assert_eq!(
            with_city.param("city"),
            Some(&ParamValue::String("Austin".to_string()))
        );

        let without_city = build_weekly_growth(&base_filter().build().expect("filter"));
        assert!(!without_city.text().contains("location.city"));
        assert_eq!(without_city.param("city"), None);
    }

    #[test]
    fn test_weekly_empty_city_is_unfiltered() {
        let query = build_weekly_growth(&base_filter().city("").build().expect("filter"));
        assert!(!query.text().contains("location.city"));
    }

    #[test]
    fn test_weekly_group_clause_follows_non_empty_list() {
        let without = build_weekly_growth(&base_filter().build().expect("filter"));
        assert!(!without.text().contains("group.name in $groups"));

        let with = build_weekly_growth(
            &base_filter()
                .groups(vec!["Rustaceans".to_string()])
                .build()
                .expect("filter"),
        );
        assert!(with.text().contains(" AND group.name in $groups"));
        assert_eq!(
            with.param("groups"),
            Some(&ParamValue::List(vec!["Rustaceans".to_string()]))
        );
    }

    #[test]
    fn test_weekly_city_clause_precedes_group_clause() {
        let query = build_weekly_growth(
            &base_filter()
                .city("Austin")
                .groups(vec!["Rustaceans".to_string()])
                .build()
                .expect("filter"),
        );
        let where_line = query
            .text()
            .lines()
            .find(|line| line.starts_with("WHERE tag.tag in $topics"))
            .expect("where line");
        assert_eq!(
            where_line,
            "WHERE tag.tag in $topics AND location.city = $city AND group.name in $groups"
        );
    }

    #[test]
    fn test_weekly_always_filters_by_topic() {
        let query = build_weekly_growth(&base_filter().topics(Vec::<String>::new()).build().expect("filter"));
        assert!(query.text().contains("WHERE tag.tag in $topics"));
        assert_eq!(query.param("topics"), Some(&ParamValue::List(Vec::new())));
    }

    #[test]
    fn test_weekly_binds_day_keys_for_range() {
        let query = build_weekly_growth(&base_filter().build().expect("filter"));
        assert_eq!(query.param("startDate"), Some(&day_param(&date(2024, 1, 1))));
        assert_eq!(query.param("endDate"), Some(&day_param(&date(2024, 1, 14))));
    }

    #[test]
    fn test_weekly_keeps_earliest_day_snapshot() {
        let query = build_weekly_growth(&base_filter().build().expect("filter"));
        assert!(query
            .text()
            .contains("head(collect(day)) as day, group, head(collect(stats)) as members"));
        assert!(query.text().ends_with("RETURN week, group, members"));
    }

    #[test]
    fn test_weekly_snapshot_spans_whole_week() {
        let query = build_weekly_growth(&base_filter().build().expect("filter"));
        let lines: Vec<&str> = query.text().lines().collect();
        let distinct = lines
            .iter()
            .position(|line| *line == "WITH DISTINCT week")
            .expect("weeks are collected");
        assert!(lines[distinct + 1].starts_with("MATCH (week)-[:HAS_DAY]->(day)<-[:ON_DAY]-(stats:Stats)"));
        assert!(!lines[distinct + 1..].iter().any(|line| line.contains("dayStart")));
    }

    #[test]
    fn test_weekly_params_cover_every_placeholder() {
        assert_params_cover_text(&build_weekly_growth(&base_filter().build().expect("filter")));
        assert_params_cover_text(&build_weekly_growth(
            &base_filter()
                .city("Austin")
                .groups(vec!["A".to_string(), "B".to_string()])
                .build()
                .expect("filter"),
        ));
    }

    // ---- monthly builder ----

    #[test]
    fn test_monthly_group_clause_follows_non_empty_list() {
        let without = build_monthly_growth(&base_filter().groups(Vec::<String>::new()).build().expect("filter"));
        assert!(!without.text().contains("group.name in $groups"));
        assert_eq!(without.param("groups"), None);

        let with = build_monthly_growth(
            &base_filter()
                .groups(vec!["GroupA".to_string()])
                .build()
                .expect("filter"),
        );
        assert!(with
            .text()
            .contains("(group)-[:HAS_MEMBERS]->(stats:Stats)-[:ON_DAY]->(day) WHERE group.name in $groups"));
    }

    #[test]
    fn test_monthly_city_clause_precedes_country_clause() {
        let query = build_monthly_growth(
            &base_filter()
                .city("Austin")
                .country("US")
                .build()
                .expect("filter"),
        );
        assert!(query.text().contains(
            "WHERE tag.tag in $topics AND location.city = $city AND location.country = $country"
        ));

        let country_only = build_monthly_growth(&base_filter().country("US").build().expect("filter"));
        assert!(country_only
            .text()
            .contains("WHERE tag.tag in $topics AND location.country = $country\n"));
        assert_eq!(country_only.param("city"), None);
    }

    #[test]
    fn test_monthly_binds_tick_bounds() {
        let query = build_monthly_growth(&base_filter().build().expect("filter"));
        assert_eq!(
            query.param("startDate"),
            Some(&ParamValue::Integer(638_396_640_000_000_000))
        );
        assert_eq!(
            query.param("endDate"),
            Some(&ParamValue::Integer(638_396_640_000_000_000 + 13 * 864_000_000_000))
        );
        assert!(query
            .text()
            .contains("WHERE d.timestamp > $startDate AND d.timestamp < $endDate"));
    }

    #[test]
    fn test_monthly_params_cover_every_placeholder() {
        assert_params_cover_text(&build_monthly_growth(&base_filter().build().expect("filter")));
        assert_params_cover_text(&build_monthly_growth(
            &base_filter()
                .city("Austin")
                .country("US")
                .groups(vec!["GroupA".to_string()])
                .build()
                .expect("filter"),
        ));
    }

    // ---- lookups ----

    #[test]
    fn test_lookup_queries_are_distinct_and_unparameterized() {
        let cities = build_cities(&LookupFilter::default());
        assert_eq!(
            cities.text(),
            "MATCH (location:Location)\nRETURN DISTINCT location.city as city"
        );
        assert!(cities.params().is_empty());

        let countries = build_countries(&LookupFilter::default());
        assert_eq!(
            countries.text(),
            "MATCH (location:Location)\nRETURN DISTINCT location.country as country"
        );
        assert!(countries.params().is_empty());
    }

    // ---- shapers ----

    #[test]
    fn test_shapers_map_empty_to_empty() {
        assert!(shape_cities(Vec::new()).is_empty());
        assert!(shape_countries(Vec::new()).is_empty());
        assert!(shape_weekly_growth(Vec::new()).is_empty());
        assert!(shape_monthly_growth(Vec::new()).is_empty());
    }

    #[test]
    fn test_weekly_shaper_is_positional() {
        let rows = vec![
            weekly_row("1/8", "B", 5),
            weekly_row("1/1", "A", 3),
            weekly_row("1/1", "A", 3),
        ];

        let shaped = shape_weekly_growth(rows.clone());

        assert_eq!(shaped.len(), rows.len());
        for (row, record) in rows.iter().zip(&shaped) {
            assert_eq!(record.week, row.week);
            assert_eq!(record.group, row.group);
            assert_eq!(record.members, row.members);
        }
    }

    #[test]
    fn test_monthly_shaper_is_positional() {
        let rows = vec![
            MonthlyGrowthRow {
                month: "2/1/2024".to_string(),
                group: "A".to_string(),
                members: 20,
            },
            MonthlyGrowthRow {
                month: "1/1/2024".to_string(),
                group: "A".to_string(),
                members: 10,
            },
        ];

        let shaped = shape_monthly_growth(rows);

        assert_eq!(
            shaped,
            vec![
                MonthlyGrowth {
                    month: "2/1/2024".to_string(),
                    group: "A".to_string(),
                    members: 20,
                },
                MonthlyGrowth {
                    month: "1/1/2024".to_string(),
                    group: "A".to_string(),
                    members: 10,
                },
            ]
        );
    }

    #[test]
    fn test_lookup_shapers_keep_duplicates_and_order() {
        let rows = vec![
            LocationCityRow {
                city: Some("Denver".to_string()),
            },
            LocationCityRow { city: None },
            LocationCityRow {
                city: Some("Denver".to_string()),
            },
        ];
        let cities = shape_cities(rows);
        assert_eq!(
            city_names(&cities),
            vec![Some("Denver"), None, Some("Denver")]
        );

        let countries = shape_countries(vec![LocationCountryRow {
            country: Some("US".to_string()),
        }]);
        assert_eq!(
            countries,
            vec![Country {
                country: Some("US".to_string())
            }]
        );
        assert_eq!(country_names(&countries), vec![Some("US")]);
    }
}
