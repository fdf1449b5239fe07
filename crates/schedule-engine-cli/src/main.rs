mod cli;

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use schedule_engine::calendar::local_midnight;
use schedule_engine::{is_scheduled_day, list_scheduled_days, Cycle, Schedule};

use crate::cli::{CliArgs, Command, ScheduleArgs};

/// JSON output of `rundays list`.
#[derive(Debug, Serialize)]
struct OccurrenceReport {
    cycle: String,
    timezone: String,
    occurrences: Vec<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let tz: Tz = args
        .schedule
        .tz
        .parse()
        .map_err(|_| anyhow!("invalid time zone '{}'", args.schedule.tz))?;
    let schedule = build_schedule(&args.schedule, &tz)?;

    match args.command {
        Command::Check { date } => {
            let date = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            let candidate = local_midnight(&tz, date)?;
            let scheduled = is_scheduled_day(&candidate, &schedule);
            debug!(%date, scheduled, "checked date");
            println!("{scheduled}");
            Ok(if scheduled {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::List => {
            let days = list_scheduled_days(&schedule).context("failed to list run days")?;
            let report = OccurrenceReport {
                cycle: schedule.rule().cycle().to_string(),
                timezone: tz.name().to_string(),
                occurrences: days
                    .iter()
                    .map(|d| d.date_naive().format("%Y-%m-%d").to_string())
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_schedule(args: &ScheduleArgs, tz: &Tz) -> Result<Schedule<Tz>> {
    let start = required(args.start, "--start")?;
    let end = required(args.end, "--end")?;
    let cycle = parse_cycle(args.cycle.as_deref().context("missing required --cycle")?)?;

    Schedule::new(
        local_midnight(tz, start)?,
        local_midnight(tz, end)?,
        cycle,
        args.week_index,
        args.day_index,
    )
    .context("invalid schedule")
}

fn required(date: Option<NaiveDate>, flag: &str) -> Result<NaiveDate> {
    date.with_context(|| format!("missing required {flag}"))
}

/// Accept either a cycle name or a legacy numeric code.
fn parse_cycle(raw: &str) -> Result<Cycle> {
    let cycle = match raw.trim().parse::<u8>() {
        Ok(code) => Cycle::try_from(code)?,
        Err(_) => raw.parse::<Cycle>()?,
    };
    Ok(cycle)
}
