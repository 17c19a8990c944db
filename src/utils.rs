use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::error::{BarlogError, Result};
use crate::models::OneRMFormula;

pub fn calculate_1rm(weight: f64, reps: u32, formula: OneRMFormula) -> f64 {
    if reps == 0 || weight <= 0.0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }

    match formula {
        OneRMFormula::Epley => weight * (1.0 + reps as f64 / 30.0),
        OneRMFormula::Brzycki => weight / (1.0278 - 0.0278 * reps as f64),
        OneRMFormula::Lombardi => weight * (reps as f64).powf(0.10),
        OneRMFormula::OConner => weight * (1.0 + 0.025 * reps as f64),
    }
}

/// Parses a `YYYY-MM-DD` day key. Longer ISO strings (`2024-03-01T10:00:00Z`)
/// are cut to their calendar day; the time of day is never interpreted.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| BarlogError::InvalidDate(s.to_string()))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Rounds to the nearest integer and groups thousands: `12345.6` -> `12,346`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .join(",");

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn one_rep_is_the_max() {
        assert_eq!(calculate_1rm(140.0, 1, OneRMFormula::Brzycki), 140.0);
        assert_eq!(calculate_1rm(140.0, 0, OneRMFormula::Epley), 0.0);
        assert!((calculate_1rm(100.0, 5, OneRMFormula::Epley) - 116.666).abs() < 0.01);
        assert!((calculate_1rm(100.0, 4, OneRMFormula::OConner) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn parse_date_truncates_timestamps() {
        assert_eq!(parse_date("2024-03-01").unwrap(), date("2024-03-01"));
        assert_eq!(parse_date("2024-03-01T23:59:59.999Z").unwrap(), date("2024-03-01"));
        assert!(parse_date("03/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn month_bounds_handle_leap_years_and_december() {
        assert_eq!(last_of_month(date("2024-02-10")), date("2024-02-29"));
        assert_eq!(last_of_month(date("2023-02-10")), date("2023-02-28"));
        assert_eq!(last_of_month(date("2024-12-31")), date("2024-12-31"));
        assert_eq!(first_of_month(date("2024-12-31")), date("2024-12-01"));
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(12345.6), "12,346");
        assert_eq!(format_thousands(1_000_000.0), "1,000,000");
        assert_eq!(format_thousands(-1500.0), "-1,500");
    }
}
