//! # schedule-engine
//!
//! Deterministic run-day rules for schedulers.
//!
//! A [`Schedule`] pairs a date window with one recurrence rule (daily every
//! N days, weekly on a weekday, monthly on a day of the month or on the N-th
//! weekday). The engine answers two questions about it: "is this date a run
//! day?" and "which dates in the window are run days?". Everything is a pure
//! function of its inputs; the caller supplies "now" when it matters.
//!
//! ## Modules
//!
//! - [`schedule`] — validated schedule definition (`Cycle`, `Recurrence`, `TimeRange`, `Schedule`)
//! - [`checker`] — point-in-time membership test
//! - [`occurrences`] — ordered enumeration of every scheduled day in the window
//! - [`calendar`] — civil-date helpers shared by the above
//! - [`error`] — Error types

pub mod calendar;
pub mod checker;
pub mod error;
pub mod occurrences;
pub mod schedule;

pub use calendar::weekday_ordinal;
pub use checker::{is_run_day, is_scheduled_day};
pub use error::{Result, ScheduleError};
pub use occurrences::list_scheduled_days;
pub use schedule::{Cycle, MonthlyMode, Recurrence, Schedule, TimeRange};
