//! Local calendar-day helpers. Records are stored in UTC, but "today" is
//! always the learner's local day.
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Last millisecond of the local day containing `at`, in UTC.
pub fn end_of_day(at: DateTime<Local>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| naive.and_local_timezone(Local).latest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| at.with_timezone(&Utc))
}

/// Local calendar date of a stored timestamp.
pub fn local_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// True when `ts` falls on the same local calendar day as `now`.
pub fn is_same_local_day(ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
    local_date(ts) == now.date_naive()
}
