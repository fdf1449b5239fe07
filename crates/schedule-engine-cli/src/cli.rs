use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Answer "is this a run day?" for a recurring schedule.
///
/// The schedule is given on the command line: a window (`--start`, `--end`),
/// a cycle and its two indices.
#[derive(Parser, Debug)]
#[command(name = "rundays", version, about = "Check and list run days of a recurring schedule")]
pub struct CliArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// First day of the window (YYYY-MM-DD); never itself a run day
    #[arg(long, global = true)]
    pub start: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub end: Option<NaiveDate>,

    /// Recurrence cycle: daily, weekly, monthly, or legacy code 4, 2, 1
    #[arg(long, global = true)]
    pub cycle: Option<String>,

    /// Monthly only: N-th weekday of the month; 0 selects day-of-month mode
    #[arg(long, global = true, default_value_t = 0, allow_negative_numbers = true)]
    pub week_index: i32,

    /// Interval in days (daily), weekday 0=Sunday..6 (weekly, monthly N-th weekday),
    /// or day of month (monthly)
    #[arg(long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    pub day_index: i32,

    /// IANA time zone the dates are interpreted in
    #[arg(long, global = true, env = "RUNDAYS_TZ", default_value = "UTC")]
    pub tz: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print whether a date is a run day; exits 1 when it is not
    Check {
        /// Date to check (YYYY-MM-DD); defaults to today in --tz
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print every run day in the window as JSON
    List,
}
