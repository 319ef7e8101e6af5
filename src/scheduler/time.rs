//! Local time parsing and lead-time validation

use crate::scheduler::ScheduleError;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format the operator enters publish times in
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Interprets `local_time_str` as a wall-clock time in `zone` and converts it to UTC
///
/// A wall-clock time that occurs twice (clocks turned back) resolves to the
/// earlier instant. One that never occurs (clocks turned forward) is an error.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use content_agent::scheduler::convert_local_to_utc;
///
/// let utc = convert_local_to_utc("2025-01-01 10:00", chrono_tz::Asia::Dubai).unwrap();
/// assert_eq!(utc, Utc.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap());
/// ```
pub fn convert_local_to_utc(
    local_time_str: &str,
    zone: Tz,
) -> Result<DateTime<Utc>, ScheduleError> {
    let input = local_time_str.trim();
    let naive = NaiveDateTime::parse_from_str(input, LOCAL_TIME_FORMAT).map_err(|_| {
        ScheduleError::InvalidFormat {
            input: input.to_string(),
        }
    })?;

    let local = zone
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ScheduleError::NonexistentLocalTime {
            input: input.to_string(),
            zone: zone.name().to_string(),
        })?;

    Ok(local.with_timezone(&Utc))
}

/// Checks that `publish_at` is at least `minimum_minutes` after `now`
///
/// "At least" is inclusive: a time exactly `minimum_minutes` ahead passes.
pub fn validate_lead_time(
    publish_at: DateTime<Utc>,
    now: DateTime<Utc>,
    minimum_minutes: i64,
) -> Result<(), ScheduleError> {
    let earliest = now + Duration::minutes(minimum_minutes);
    if publish_at < earliest {
        return Err(ScheduleError::LeadTimeTooShort {
            publish_at,
            earliest,
            minimum_minutes,
        });
    }
    Ok(())
}
