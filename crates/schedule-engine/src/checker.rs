//! Recurrence checker: does a given date match a schedule?
//!
//! The checker never fails. A candidate outside the window, or one the rule
//! does not select, is simply "not scheduled". Unknown cycle codes are
//! rejected earlier, when a [`Cycle`](crate::Cycle) is parsed.

use chrono::{DateTime, Datelike, TimeZone};
use tracing::trace;

use crate::calendar::{local_midnight, truncate_to_midnight, weekday_ordinal};
use crate::schedule::{Cycle, MonthlyMode, Schedule};

/// Decide whether `candidate` is a scheduled day of `schedule`.
///
/// The window is `[start + 1 day, end]`: the start day itself never matches,
/// the end day can.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use schedule_engine::{is_scheduled_day, Cycle, Schedule};
///
/// let start = Utc.with_ymd_and_hms(2019, 11, 3, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2019, 11, 9, 0, 0, 0).unwrap();
/// let schedule = Schedule::new(start, end, Cycle::Daily, 0, 2).unwrap();
///
/// let candidate = Utc.with_ymd_and_hms(2019, 11, 5, 0, 0, 0).unwrap();
/// assert!(is_scheduled_day(&candidate, &schedule));
/// ```
pub fn is_scheduled_day<Tz: TimeZone>(candidate: &DateTime<Tz>, schedule: &Schedule<Tz>) -> bool {
    let period = schedule.period();
    let start_date = period.start().date_naive();

    let first_eligible = match start_date
        .succ_opt()
        .map(|day| local_midnight(&period.start().timezone(), day))
    {
        Some(Ok(dt)) => dt,
        _ => return false,
    };
    if *candidate < first_eligible || candidate > period.end() {
        return false;
    }

    let rule = schedule.rule();
    let date = candidate.date_naive();
    let weekday = weekday_ordinal(date.weekday());

    let matched = match rule.cycle() {
        Cycle::Daily => {
            let elapsed = (date - start_date).num_days();
            elapsed % i64::from(rule.day_index()) == 0
        }
        Cycle::Weekly => weekday == rule.day_index(),
        Cycle::Monthly => match rule.monthly_mode() {
            MonthlyMode::NthWeekday { nth, weekday: target } => {
                date.day0() / 7 + 1 == nth && weekday == target
            }
            MonthlyMode::DayOfMonth(day) => date.day() == day,
        },
    };
    trace!(%date, cycle = %rule.cycle(), matched, "checked candidate");
    matched
}

/// Whether the civil day containing `now` is a run day of `schedule`.
///
/// `now` is converted into the schedule's zone and truncated to midnight
/// before checking, so any instant during the day gives the same answer.
/// The caller supplies `now`; the library never reads the clock.
pub fn is_run_day<Tz: TimeZone, Now: TimeZone>(
    schedule: &Schedule<Tz>,
    now: &DateTime<Now>,
) -> bool {
    let local = now.with_timezone(&schedule.period().start().timezone());
    match truncate_to_midnight(&local) {
        Ok(today) => is_scheduled_day(&today, schedule),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::New_York;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn schedule(
        start: (i32, u32, u32),
        end: (i32, u32, u32),
        cycle: Cycle,
        w: i32,
        d: i32,
    ) -> Schedule<Utc> {
        let (start, end) = (utc(start.0, start.1, start.2), utc(end.0, end.1, end.2));
        Schedule::new(start, end, cycle, w, d).unwrap()
    }

    // ── window ──────────────────────────────────────────────────────────

    #[test]
    fn test_start_day_never_matches() {
        let s = schedule((2019, 11, 3), (2019, 11, 30), Cycle::Daily, 0, 1);
        assert!(!is_scheduled_day(&utc(2019, 11, 3), &s));
        assert!(is_scheduled_day(&utc(2019, 11, 4), &s));
    }

    #[test]
    fn test_end_day_matches_but_not_after() {
        let s = schedule((2019, 11, 3), (2019, 11, 9), Cycle::Daily, 0, 1);
        assert!(is_scheduled_day(&utc(2019, 11, 9), &s));
        assert!(!is_scheduled_day(
            &Utc.with_ymd_and_hms(2019, 11, 9, 0, 0, 1).unwrap(),
            &s
        ));
        assert!(!is_scheduled_day(&utc(2019, 11, 10), &s));
    }

    #[test]
    fn test_before_window() {
        let s = schedule((2019, 11, 3), (2019, 11, 30), Cycle::Weekly, 0, 5);
        assert!(!is_scheduled_day(&utc(2019, 11, 1), &s));
    }

    // ── daily ───────────────────────────────────────────────────────────

    #[test]
    fn test_daily_every_other_day() {
        let s = schedule((2019, 11, 3), (2019, 11, 9), Cycle::Daily, 0, 2);
        assert!(is_scheduled_day(&utc(2019, 11, 5), &s));
        assert!(!is_scheduled_day(&utc(2019, 11, 6), &s));
        assert!(is_scheduled_day(&utc(2019, 11, 7), &s));
    }

    #[test]
    fn test_daily_ignores_time_of_day() {
        let s = schedule((2019, 11, 3), (2019, 11, 9), Cycle::Daily, 0, 2);
        let afternoon = Utc.with_ymd_and_hms(2019, 11, 5, 15, 30, 0).unwrap();
        assert!(is_scheduled_day(&afternoon, &s));
    }

    #[test]
    fn test_daily_across_dst_change() {
        // US fall back on 2019-11-03 makes that day 25 hours long
        let start = New_York.with_ymd_and_hms(2019, 11, 1, 0, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2019, 11, 30, 0, 0, 0).unwrap();
        let s = Schedule::new(start, end, Cycle::Daily, 0, 3).unwrap();
        let nov4 = New_York.with_ymd_and_hms(2019, 11, 4, 0, 0, 0).unwrap();
        let nov5 = New_York.with_ymd_and_hms(2019, 11, 5, 0, 0, 0).unwrap();
        assert!(is_scheduled_day(&nov4, &s));
        assert!(!is_scheduled_day(&nov5, &s));
    }

    // ── weekly ──────────────────────────────────────────────────────────

    #[test]
    fn test_weekly_monday() {
        let s = schedule((2019, 11, 1), (2019, 11, 20), Cycle::Weekly, 1, 1);
        assert!(is_scheduled_day(&utc(2019, 11, 4), &s));
        assert!(is_scheduled_day(&utc(2019, 11, 18), &s));
        assert!(!is_scheduled_day(&utc(2019, 11, 5), &s));
    }

    #[test]
    fn test_weekly_uses_candidate_zone_weekday() {
        // 2019-11-04 23:00 at UTC-05:00 is still Monday locally
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2019, 11, 1, 0, 0, 0).unwrap();
        let end = tz.with_ymd_and_hms(2019, 11, 20, 0, 0, 0).unwrap();
        let s = Schedule::new(start, end, Cycle::Weekly, 0, 1).unwrap();
        let late_monday = tz.with_ymd_and_hms(2019, 11, 4, 23, 0, 0).unwrap();
        assert!(is_scheduled_day(&late_monday, &s));
    }

    // ── monthly ─────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_day_of_month_uses_candidate() {
        let s = schedule((2019, 10, 31), (2019, 11, 20), Cycle::Monthly, 0, 4);
        assert!(is_scheduled_day(&utc(2019, 11, 4), &s));
        assert!(!is_scheduled_day(&utc(2019, 11, 2), &s));
        assert!(!is_scheduled_day(&utc(2019, 11, 5), &s));
    }

    #[test]
    fn test_monthly_first_monday() {
        let s = schedule((2019, 10, 1), (2020, 1, 31), Cycle::Monthly, 1, 1);
        assert!(is_scheduled_day(&utc(2019, 10, 7), &s));
        assert!(is_scheduled_day(&utc(2019, 11, 4), &s));
        assert!(is_scheduled_day(&utc(2019, 12, 2), &s));
        // Second Monday of November
        assert!(!is_scheduled_day(&utc(2019, 11, 11), &s));
    }

    #[test]
    fn test_monthly_second_weekday_on_day_seven() {
        // 2019-11-07 is the first Thursday, 2019-11-14 the second
        let s = schedule((2019, 11, 1), (2019, 11, 30), Cycle::Monthly, 2, 4);
        assert!(!is_scheduled_day(&utc(2019, 11, 7), &s));
        assert!(is_scheduled_day(&utc(2019, 11, 14), &s));
    }

    #[test]
    fn test_monthly_fifth_friday() {
        // November 2019 has five Fridays: 1, 8, 15, 22, 29
        let s = schedule((2019, 10, 1), (2019, 12, 31), Cycle::Monthly, 5, 5);
        assert!(is_scheduled_day(&utc(2019, 11, 29), &s));
        assert!(!is_scheduled_day(&utc(2019, 12, 27), &s));
    }

    // ── is_run_day ──────────────────────────────────────────────────────

    #[test]
    fn test_run_day_any_time_of_day() {
        let s = schedule((2019, 11, 1), (2019, 11, 20), Cycle::Weekly, 0, 1);
        let morning = Utc.with_ymd_and_hms(2019, 11, 11, 6, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2019, 11, 11, 23, 59, 59).unwrap();
        assert!(is_run_day(&s, &morning));
        assert!(is_run_day(&s, &night));
    }

    #[test]
    fn test_run_day_converts_into_schedule_zone() {
        let start = New_York.with_ymd_and_hms(2019, 11, 1, 0, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2019, 11, 20, 0, 0, 0).unwrap();
        let s = Schedule::new(start, end, Cycle::Weekly, 0, 1).unwrap();
        // 03:00 UTC Tuesday is still Monday evening in New York
        let now = Utc.with_ymd_and_hms(2019, 11, 12, 3, 0, 0).unwrap();
        assert!(is_run_day(&s, &now));
    }
}
