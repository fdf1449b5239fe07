//! Civil-date helpers shared by the checker and the enumerator.
//!
//! All stepping happens on [`NaiveDate`] values taken in the schedule's zone;
//! dates are only turned back into zoned timestamps at the edges, via
//! [`local_midnight`].

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Weekday};

use crate::error::ScheduleError;

/// Weekday as an ordinal with Sunday = 0 … Saturday = 6.
pub fn weekday_ordinal(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

/// Midnight of `date` in `tz`.
///
/// Where a DST transition removes midnight, the first wall-clock hour that
/// exists on that date is used instead.
pub fn local_midnight<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
) -> Result<DateTime<Tz>, ScheduleError> {
    (0..=2)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| tz.from_local_datetime(&date.and_time(time)).earliest())
        .ok_or_else(|| {
            ScheduleError::InvalidDatetime(format!("no local midnight for {date} in zone"))
        })
}

/// Truncate a timestamp to midnight of its civil date, keeping its zone.
pub fn truncate_to_midnight<Tz: TimeZone>(
    dt: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ScheduleError> {
    local_midnight(&dt.timezone(), dt.date_naive())
}

pub(crate) fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

pub(crate) fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

pub(crate) fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)?.checked_add_months(Months::new(1))
}

/// Offset in days from `anchor` to the `nth` occurrence (1-based) of weekday
/// ordinal `weekday` on or after it.
pub(crate) fn nth_weekday_offset(anchor: NaiveDate, nth: u32, weekday: u32) -> u64 {
    let lead = (7 + weekday - weekday_ordinal(anchor.weekday())) % 7;
    7 * u64::from(nth.saturating_sub(1)) + u64::from(lead)
}
