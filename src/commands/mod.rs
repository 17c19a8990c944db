pub mod analyze;
pub mod calendar;
pub mod config;
pub mod log;
pub mod maximums;
pub mod report;
pub mod stats;
pub mod trend;

use anyhow::{Context, Result};
use barlog::{models::WorkoutLog, storage, utils::parse_date};
use chrono::NaiveDate;

use crate::types::Settings;

/// Parses an optional `YYYY-MM-DD` argument, defaulting to today's local date.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => parse_date(d).with_context(|| format!("bad date argument `{d}`")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(from).with_context(|| format!("bad --from date `{from}`"))?;
    let end = parse_date(to).with_context(|| format!("bad --to date `{to}`"))?;
    if start > end {
        anyhow::bail!("--from ({start}) is after --to ({end})");
    }
    Ok((start, end))
}

pub fn load_log(settings: &Settings) -> Result<WorkoutLog> {
    storage::load_log(&settings.log_path)
}
