//! Occurrence enumerator: every scheduled day strictly inside a window.
//!
//! Stepping is done on civil dates in the schedule's zone, so a day always
//! advances by one calendar day regardless of DST. Results are materialized
//! in full and returned in ascending order, each at local midnight.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use tracing::debug;

use crate::calendar::{
    add_days, first_of_month, local_midnight, next_month, nth_weekday_offset, weekday_ordinal,
};
use crate::error::Result;
use crate::schedule::{Cycle, MonthlyMode, Recurrence, Schedule};

/// List every date in `(start, end)` that matches the schedule's rule.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDatetime`](crate::ScheduleError::InvalidDatetime) if an occurrence has no
/// representable midnight in the schedule's zone.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use schedule_engine::{list_scheduled_days, Cycle, Schedule};
///
/// let start = Utc.with_ymd_and_hms(2019, 11, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2019, 11, 20, 0, 0, 0).unwrap();
/// let schedule = Schedule::new(start, end, Cycle::Weekly, 0, 1).unwrap();
///
/// let days: Vec<NaiveDate> = list_scheduled_days(&schedule)
///     .unwrap()
///     .iter()
///     .map(|d| d.date_naive())
///     .collect();
/// assert_eq!(days.len(), 3);
/// assert_eq!(days[0], NaiveDate::from_ymd_opt(2019, 11, 4).unwrap());
/// ```
pub fn list_scheduled_days<Tz: TimeZone>(schedule: &Schedule<Tz>) -> Result<Vec<DateTime<Tz>>> {
    let start = schedule.period().start().date_naive();
    let end = schedule.period().end().date_naive();
    let rule = schedule.rule();

    let dates = match rule.cycle() {
        Cycle::Daily => daily_dates(start, end, rule.day_index()),
        Cycle::Weekly => weekly_dates(start, end, rule.day_index()),
        Cycle::Monthly => monthly_dates(start, end, rule),
    };
    debug!(cycle = %rule.cycle(), count = dates.len(), %start, %end, "enumerated occurrences");

    let tz = schedule.period().start().timezone();
    dates
        .into_iter()
        .map(|date| local_midnight(&tz, date))
        .collect()
}

/// Emit `first`, `first + step`, … while before `end`.
fn stepped_dates(first: Option<NaiveDate>, end: NaiveDate, step: u64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = first;
    while let Some(date) = current.filter(|d| *d < end) {
        dates.push(date);
        current = add_days(date, step);
    }
    dates
}

fn daily_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    let step = u64::from(interval);
    stepped_dates(add_days(start, step), end, step)
}

/// The start day is never emitted, even when it falls on the target weekday.
fn weekly_dates(start: NaiveDate, end: NaiveDate, weekday: u32) -> Vec<NaiveDate> {
    let lead = match (7 + weekday - weekday_ordinal(start.weekday())) % 7 {
        0 => 7,
        n => u64::from(n),
    };
    stepped_dates(add_days(start, lead), end, 7)
}

/// An N-th weekday rule whose weekday ordinal is above 6 names no weekday
/// and yields nothing.
fn monthly_dates(start: NaiveDate, end: NaiveDate, rule: &Recurrence) -> Vec<NaiveDate> {
    let mode = rule.monthly_mode();
    let mut dates = Vec::new();
    if matches!(mode, MonthlyMode::NthWeekday { weekday, .. } if weekday > 6) {
        return dates;
    }
    let mut anchor = first_of_month(start);

    // A date past chrono's range is past `end` too
    while let Some(month) = anchor {
        let offset = match mode {
            MonthlyMode::NthWeekday { nth, weekday } => nth_weekday_offset(month, nth, weekday),
            MonthlyMode::DayOfMonth(day) => u64::from(day - 1),
        };
        let Some(candidate) = add_days(month, offset).filter(|d| *d < end) else {
            break;
        };
        anchor = next_month(month);
        // Day 31 in a 30-day month, or a missing fifth weekday, rolls over
        let in_month = anchor.map_or(true, |following| candidate < following);
        if in_month && candidate > start {
            dates.push(candidate);
        }
    }
    dates
}
