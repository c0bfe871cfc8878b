//! Calendar conversions used by the growth queries
//!
//! The graph stores one `Day` node per calendar day. Weekly queries locate
//! those nodes by their `{day, month, year}` properties, monthly queries
//! compare their `timestamp` property, which holds .NET-style ticks.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Ticks between 0001-01-01T00:00:00Z (the .NET `DateTime` epoch) and the Unix epoch.
///
/// A tick is 100 nanoseconds. Existing `Day.timestamp` values were written
/// against this epoch, so the value is a storage format contract.
pub const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// Ticks per millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Convert a date-time to ticks since 0001-01-01T00:00:00Z
///
/// Precision is truncated to whole milliseconds, matching how the stored
/// timestamps were produced. Out-of-range values saturate at the `i64` bounds.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use groupstats_core::calendar::to_ticks;
///
/// let epoch = Utc.timestamp_opt(0, 0).unwrap();
/// assert_eq!(to_ticks(&epoch), 621_355_968_000_000_000);
/// ```
pub fn to_ticks(date_time: &DateTime<Utc>) -> i64 {
    date_time
        .timestamp_millis()
        .saturating_mul(TICKS_PER_MILLISECOND)
        .saturating_add(TICKS_AT_UNIX_EPOCH)
}

/// Calendar date identifying a `Day` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<&DateTime<Utc>> for DayKey {
    fn from(date_time: &DateTime<Utc>) -> Self {
        Self {
            year: date_time.year(),
            month: date_time.month(),
            day: date_time.day(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .unwrap_or_else(|| panic!("invalid test date {y}-{m}-{d}"))
    }

    #[test]
    fn test_unix_epoch_maps_to_offset() {
        assert_eq!(to_ticks(&utc(1970, 1, 1, 0, 0, 0)), 621_355_968_000_000_000);
    }

    #[test]
    fn test_known_dotnet_tick_values() {
        // DateTime(2024, 1, 1).Ticks
        assert_eq!(to_ticks(&utc(2024, 1, 1, 0, 0, 0)), 638_396_640_000_000_000);
        // DateTime(2000, 1, 1).Ticks
        assert_eq!(to_ticks(&utc(2000, 1, 1, 0, 0, 0)), 630_822_816_000_000_000);
    }

    #[test]
    fn test_sub_millisecond_precision_is_dropped() {
        let epoch = utc(1970, 1, 1, 0, 0, 0);
        assert_eq!(
            to_ticks(&(epoch + Duration::microseconds(999))),
            TICKS_AT_UNIX_EPOCH
        );
        assert_eq!(
            to_ticks(&(epoch + Duration::milliseconds(1))),
            TICKS_AT_UNIX_EPOCH + TICKS_PER_MILLISECOND
        );
    }

    #[test]
    fn test_pre_epoch_dates_are_below_offset() {
        let ticks = to_ticks(&utc(1969, 12, 31, 23, 59, 59));
        assert_eq!(ticks, TICKS_AT_UNIX_EPOCH - 1_000 * TICKS_PER_MILLISECOND);
    }

    #[test]
    fn test_day_key_uses_utc_calendar_date() {
        let key = DayKey::from(&utc(2024, 3, 9, 23, 30, 0));
        assert_eq!(
            key,
            DayKey {
                year: 2024,
                month: 3,
                day: 9
            }
        );
    }
}
