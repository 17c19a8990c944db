//! Day-by-day rollups of a workout log over explicit date ranges.

use std::fmt::Display;

use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::intensity::intensity_or_zero;
use crate::models::{DailyRecord, WorkoutLog};
use crate::tonnage::{exercise_reps, exercise_tonnage};
use crate::utils::{first_of_month, last_of_month};

pub const WEEK_DAYS: u64 = 7;
pub const CHRONIC_DAYS: u64 = 28;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub sets: u64,
    pub reps: u64,
    pub tonnage: f64,
    pub avg_intensity: f64,
    /// Calendar days walked, whether or not anything was logged.
    pub days: u32,
    pub days_with_workouts: u32,
}

/// A day counts as trained when it has a record with at least one exercise.
/// Macro-only days do not count.
pub fn has_workout(record: Option<&DailyRecord>) -> bool {
    record.is_some_and(|r| !r.exercises.is_empty())
}

/// Sums sets, reps and tonnage for every calendar day in `start..=end`.
/// Days without a record contribute nothing; a reversed range is all zero.
pub fn aggregate(log: &WorkoutLog, start: NaiveDate, end: NaiveDate) -> Aggregate {
    let mut agg = Aggregate::default();

    for day in start.iter_days().take_while(|d| *d <= end) {
        agg.days += 1;
        let record = log.get(day);
        if has_workout(record) {
            agg.days_with_workouts += 1;
        }

        for ex in record.map(|r| r.exercises.as_slice()).unwrap_or_default() {
            agg.sets += ex.sets.len() as u64;
            agg.reps += exercise_reps(ex);
            agg.tonnage += exercise_tonnage(ex);
        }
    }

    agg.avg_intensity = intensity_or_zero(agg.tonnage, agg.reps);
    tracing::trace!(%start, %end, days = agg.days, tonnage = agg.tonnage, "aggregated range");
    agg
}

pub fn days_with_workouts(log: &WorkoutLog, start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| has_workout(log.get(*d)))
        .count() as u32
}

/// Named windows relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    #[value(alias = "d")]
    Daily,
    /// The 7 days ending on the reference date.
    #[default]
    #[value(alias = "w")]
    Weekly,
    /// The calendar month containing the reference date.
    #[value(alias = "m")]
    Monthly,
    /// The 28 days ending on the reference date.
    #[value(alias = "c")]
    Chronic,
}

impl Window {
    pub fn bounds(self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Window::Daily => (reference, reference),
            Window::Weekly => (trailing_start(reference, WEEK_DAYS), reference),
            Window::Monthly => (first_of_month(reference), last_of_month(reference)),
            Window::Chronic => (trailing_start(reference, CHRONIC_DAYS), reference),
        }
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Window::Daily => "daily",
            Window::Weekly => "weekly",
            Window::Monthly => "monthly",
            Window::Chronic => "chronic",
        };

        write!(f, "{}", s)
    }
}

/// First day of the `len`-day window that ends on `end`.
pub fn trailing_start(end: NaiveDate, len: u64) -> NaiveDate {
    end.checked_sub_days(Days::new(len.saturating_sub(1)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn aggregate_window(log: &WorkoutLog, window: Window, reference: NaiveDate) -> Aggregate {
    let (start, end) = window.bounds(reference);
    aggregate(log, start, end)
}

#[cfg(test)]
mod tests {
    use crate::models::{Exercise, Set};
    use crate::nutrition::MacroData;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn squat_day(log: &mut WorkoutLog, d: &str, weight: f64, reps: u32) {
        log.add_exercise(
            date(d),
            Exercise::simple("Back Squat").with_sets([Set::simple(weight, reps)]),
        );
    }

    #[test]
    fn window_bounds() {
        let d = date("2024-03-10");
        assert_eq!(Window::Daily.bounds(d), (d, d));
        assert_eq!(Window::Weekly.bounds(d), (date("2024-03-04"), d));
        assert_eq!(Window::Chronic.bounds(d), (date("2024-02-12"), d));
        assert_eq!(
            Window::Monthly.bounds(d),
            (date("2024-03-01"), date("2024-03-31"))
        );
    }

    #[test]
    fn weekly_window_crosses_month_boundary() {
        let d = date("2024-03-02");
        assert_eq!(Window::Weekly.bounds(d), (date("2024-02-25"), d));
    }

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let mut log = WorkoutLog::new();
        squat_day(&mut log, "2024-03-01", 100.0, 5);
        squat_day(&mut log, "2024-03-03", 100.0, 3);
        squat_day(&mut log, "2024-03-04", 100.0, 1);

        let agg = aggregate(&log, date("2024-03-01"), date("2024-03-03"));
        assert_eq!(agg.sets, 2);
        assert_eq!(agg.reps, 8);
        assert_eq!(agg.tonnage, 800.0);
        assert_eq!(agg.avg_intensity, 100.0);
        assert_eq!(agg.days, 3);
        assert_eq!(agg.days_with_workouts, 2);
    }

    #[test]
    fn reversed_range_is_empty() {
        let mut log = WorkoutLog::new();
        squat_day(&mut log, "2024-03-01", 100.0, 5);
        let agg = aggregate(&log, date("2024-03-02"), date("2024-03-01"));
        assert_eq!(agg, Aggregate::default());
    }

    #[test]
    fn macro_only_days_are_not_workouts() {
        let mut log = WorkoutLog::new();
        log.record_mut(date("2024-03-01")).macros = Some(MacroData::new(100.0, 100.0, 100.0));
        squat_day(&mut log, "2024-03-02", 60.0, 10);

        assert!(!has_workout(log.get(date("2024-03-01"))));
        assert!(has_workout(log.get(date("2024-03-02"))));
        assert!(!has_workout(log.get(date("2024-03-03"))));
        assert_eq!(days_with_workouts(&log, date("2024-03-01"), date("2024-03-03")), 1);
    }

    #[test]
    fn monthly_stays_inside_the_calendar_month() {
        let mut log = WorkoutLog::new();
        squat_day(&mut log, "2024-01-31", 100.0, 5);
        squat_day(&mut log, "2024-02-01", 100.0, 2);
        squat_day(&mut log, "2024-02-29", 100.0, 3);
        squat_day(&mut log, "2024-03-01", 100.0, 4);

        let feb = aggregate_window(&log, Window::Monthly, date("2024-02-15"));
        assert_eq!(feb.days, 29);
        assert_eq!(feb.reps, 5);
        assert_eq!(feb.tonnage, 500.0);
    }
}
