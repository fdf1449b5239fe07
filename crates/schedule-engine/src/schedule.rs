//! Schedule definition: a date window plus one recurrence rule.
//!
//! A [`Schedule`] is validated once by [`Schedule::new`] and never mutated
//! afterwards. Both window bounds are truncated to midnight in the zone they
//! were supplied in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Duration, TimeZone};
use tracing::debug;

use crate::calendar::truncate_to_midnight;
use crate::error::{Result, ScheduleError};

// ── Cycle ───────────────────────────────────────────────────────────────────

/// The recurrence kind of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cycle {
    Monthly,
    Weekly,
    Daily,
}

impl Cycle {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Cycle::Monthly => "monthly",
            Cycle::Weekly => "weekly",
            Cycle::Daily => "daily",
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy numeric cycle codes: `1` monthly, `2` weekly, `4` daily.
impl TryFrom<u8> for Cycle {
    type Error = ScheduleError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Cycle::Monthly),
            2 => Ok(Cycle::Weekly),
            4 => Ok(Cycle::Daily),
            other => Err(ScheduleError::UnrecognizedCycle(other.to_string())),
        }
    }
}

impl FromStr for Cycle {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Cycle::Monthly),
            "weekly" => Ok(Cycle::Weekly),
            "daily" => Ok(Cycle::Daily),
            _ => Err(ScheduleError::UnrecognizedCycle(format!("'{s}'"))),
        }
    }
}

// ── Recurrence ──────────────────────────────────────────────────────────────

/// A recurrence rule. `day_index` is overloaded per cycle:
///
/// - `Daily`: interval in days between occurrences.
/// - `Weekly`: weekday ordinal, 0 = Sunday … 6 = Saturday.
/// - `Monthly`: weekday ordinal when `week_index >= 1`, otherwise the
///   calendar day of the month. See [`Recurrence::monthly_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Recurrence {
    cycle: Cycle,
    week_index: u32,
    day_index: u32,
}

/// How a monthly rule picks its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyMode {
    /// The `nth` occurrence of weekday ordinal `weekday` in the month.
    NthWeekday { nth: u32, weekday: u32 },
    /// A fixed calendar day of the month.
    DayOfMonth(u32),
}

impl Recurrence {
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn week_index(&self) -> u32 {
        self.week_index
    }

    pub fn day_index(&self) -> u32 {
        self.day_index
    }

    pub fn monthly_mode(&self) -> MonthlyMode {
        if self.week_index >= 1 {
            MonthlyMode::NthWeekday {
                nth: self.week_index,
                weekday: self.day_index,
            }
        } else {
            MonthlyMode::DayOfMonth(self.day_index)
        }
    }
}

// ── TimeRange / Schedule ────────────────────────────────────────────────────

/// The window a schedule is evaluated in; both ends sit at local midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeRange<Tz> {
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }
}

/// A validated, immutable recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<Tz: TimeZone> {
    period: TimeRange<Tz>,
    rule: Recurrence,
}

impl<Tz: TimeZone> Schedule<Tz> {
    /// Validate the inputs and build a schedule.
    ///
    /// Checks run in this order and the first failure is returned:
    ///
    /// 1. `end` at least one day after `start`, else [`ScheduleError::InvalidRange`]
    /// 2. `day_index >= 1` and `week_index >= 0`, else [`ScheduleError::InvalidIndex`]
    /// 3. weekly: `day_index <= 6`, else [`ScheduleError::InvalidWeeklyIndex`]
    /// 4. monthly: `day_index <= 31`, else [`ScheduleError::InvalidMonthlyIndex`]
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use schedule_engine::{Cycle, Schedule, ScheduleError};
    ///
    /// let start = Utc.with_ymd_and_hms(2019, 11, 3, 0, 0, 0).unwrap();
    /// let err = Schedule::new(start, start, Cycle::Daily, 0, 2).unwrap_err();
    /// assert_eq!(err, ScheduleError::InvalidRange);
    /// ```
    pub fn new(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        cycle: Cycle,
        week_index: i32,
        day_index: i32,
    ) -> Result<Self> {
        let day_after_start = start
            .clone()
            .checked_add_days(Days::new(1))
            .unwrap_or_else(|| start.clone() + Duration::days(1));
        if end < day_after_start {
            debug!(%cycle, "rejecting schedule: end is not a full day after start");
            return Err(ScheduleError::InvalidRange);
        }

        let (week, day) = match (u32::try_from(week_index), u32::try_from(day_index)) {
            (Ok(week), Ok(day)) if day >= 1 => (week, day),
            _ => {
                debug!(%cycle, week_index, day_index, "rejecting schedule: bad index");
                return Err(ScheduleError::InvalidIndex {
                    week_index,
                    day_index,
                });
            }
        };

        match cycle {
            Cycle::Weekly if day > 6 => {
                debug!(%cycle, day_index, "rejecting schedule: weekday out of range");
                return Err(ScheduleError::InvalidWeeklyIndex(day_index));
            }
            Cycle::Monthly if day > 31 => {
                debug!(%cycle, day_index, "rejecting schedule: day of month out of range");
                return Err(ScheduleError::InvalidMonthlyIndex(day_index));
            }
            _ => {}
        }

        Ok(Self {
            period: TimeRange {
                start: truncate_to_midnight(&start)?,
                end: truncate_to_midnight(&end)?,
            },
            rule: Recurrence {
                cycle,
                week_index: week,
                day_index: day,
            },
        })
    }

    pub fn period(&self) -> &TimeRange<Tz> {
        &self.period
    }

    pub fn rule(&self) -> &Recurrence {
        &self.rule
    }

    /// Method form of [`crate::checker::is_scheduled_day`].
    pub fn is_scheduled_day(&self, candidate: &DateTime<Tz>) -> bool {
        crate::checker::is_scheduled_day(candidate, self)
    }

    /// Method form of [`crate::occurrences::list_scheduled_days`].
    pub fn scheduled_days(&self) -> Result<Vec<DateTime<Tz>>> {
        crate::occurrences::list_scheduled_days(self)
    }
}
