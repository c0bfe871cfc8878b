//! Conversion of filter values into query parameter values

use super::cypher::ParamValue;
use chrono::{DateTime, Utc};
use groupstats_core::calendar::{to_ticks, DayKey};
use std::collections::BTreeMap;

impl From<DayKey> for ParamValue {
    fn from(key: DayKey) -> Self {
        let mut map = BTreeMap::new();
        map.insert("day".to_string(), ParamValue::Integer(i64::from(key.day)));
        map.insert(
            "month".to_string(),
            ParamValue::Integer(i64::from(key.month)),
        );
        map.insert("year".to_string(), ParamValue::Integer(i64::from(key.year)));
        ParamValue::Map(map)
    }
}

/// `{day, month, year}` map used to match a `Day` node by its calendar date
pub fn day_param(date_time: &DateTime<Utc>) -> ParamValue {
    DayKey::from(date_time).into()
}

/// Tick count compared against `Day.timestamp`
pub fn ticks_param(date_time: &DateTime<Utc>) -> ParamValue {
    ParamValue::Integer(to_ticks(date_time))
}
