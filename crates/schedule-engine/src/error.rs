//! Error types for schedule-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid range: end date should be at least one day after start")]
    InvalidRange,

    #[error("Invalid index: week index must be >= 0 and day index >= 1 (got week {week_index}, day {day_index})")]
    InvalidIndex { week_index: i32, day_index: i32 },

    #[error("Invalid weekly index: weekly schedule needs a day index <= 6 (got {0})")]
    InvalidWeeklyIndex(i32),

    #[error("Invalid monthly index: monthly schedule needs a day index <= 31 (got {0})")]
    InvalidMonthlyIndex(i32),

    #[error("Unrecognized recurrence cycle: {0}")]
    UnrecognizedCycle(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
