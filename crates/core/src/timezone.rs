//! Fixed-offset local-day bucketing.
//!
//! Every daily record is keyed by "local midnight": the UTC instant at
//! which the user's calendar day begins, given a signed minute offset
//! supplied per request. Only the numeric offset is consulted -- no IANA
//! zone database, no DST rules. Users in DST-observing regions drift by
//! one hour across transitions; this matches the historical data and is a
//! deliberate simplification.

use chrono::{Duration, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Smallest offset accepted, in minutes (UTC-12:00).
pub const MIN_OFFSET_MINUTES: i32 = -720;

/// Largest offset accepted, in minutes (UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 840;

/// Legacy fixed offset (Dhaka, UTC+6). All records written before
/// per-request offsets were introduced used this value; keep it available
/// for reading that history.
pub const DHAKA_OFFSET_MINUTES: i32 = 360;

/// Seconds in one day.
pub const SECS_PER_DAY: i64 = 86_400;

/// Reject offsets outside the inhabited range.
pub fn validate_offset(offset_minutes: i32) -> Result<(), CoreError> {
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset_minutes) {
        return Err(CoreError::Validation(format!(
            "timezone offset must be between {MIN_OFFSET_MINUTES} and {MAX_OFFSET_MINUTES} minutes, got {offset_minutes}"
        )));
    }
    Ok(())
}

/// Compute local midnight for `ts` under the given offset, expressed in UTC.
///
/// Shift the instant by the offset to obtain the local wall-clock reading,
/// take that reading's calendar date, and return `date@00:00` shifted back
/// to UTC. Handles day rollover in both directions.
///
/// Idempotent: truncating an already-truncated instant with the same
/// offset yields the same instant.
pub fn local_midnight(ts: Timestamp, offset_minutes: i32) -> Result<Timestamp, CoreError> {
    validate_offset(offset_minutes)?;
    let offset = Duration::minutes(i64::from(offset_minutes));
    let local_date = (ts + offset).date_naive();
    let midnight_local = Utc.from_utc_datetime(&local_date.and_time(NaiveTime::MIN));
    Ok(midnight_local - offset)
}

/// Number of whole days from `earlier` to `later` (floor division).
///
/// Both arguments are expected to be local-midnight instants; when the
/// user's offset changed between the two writes the difference is not an
/// exact multiple of a day, and flooring keeps the bucket math stable.
pub fn days_between(earlier: Timestamp, later: Timestamp) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECS_PER_DAY)
}

/// Render a local-midnight instant as the `YYYY-MM-DD` string the user
/// would read on their own calendar.
pub fn local_day_string(midnight: Timestamp, offset_minutes: i32) -> String {
    let shifted = midnight + Duration::minutes(i64::from(offset_minutes));
    shifted.date_naive().format("%Y-%m-%d").to_string()
}
