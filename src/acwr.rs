//! Acute:chronic workload ratio.
//!
//! Acute load is the 7-day tonnage ending on the reference date. Chronic load
//! is the 28-day tonnage ending on the same date, divided by 4 to put it on a
//! weekly scale. Both guards below return 0 instead of a ratio.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::WorkoutLog;
use crate::window::{self, Window};

/// Fewer trained days than this in the chronic window gives no ratio.
pub const MIN_CHRONIC_WORKOUT_DAYS: u32 = 7;

const WEEKS_PER_CHRONIC_WINDOW: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcwrZone {
    /// Below 0.8.
    Undertrained,
    /// 0.8 to 1.3.
    Optimal,
    /// 1.3 to 1.5.
    Caution,
    /// Above 1.5.
    HighRisk,
}

impl AcwrZone {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r < 0.8 => AcwrZone::Undertrained,
            r if r <= 1.3 => AcwrZone::Optimal,
            r if r <= 1.5 => AcwrZone::Caution,
            _ => AcwrZone::HighRisk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AcwrZone::Undertrained => "undertrained",
            AcwrZone::Optimal => "optimal",
            AcwrZone::Caution => "caution",
            AcwrZone::HighRisk => "high risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcwrReport {
    pub reference: NaiveDate,
    pub acute: f64,
    pub chronic_tonnage: f64,
    pub chronic_weekly_average: f64,
    pub days_with_workouts: u32,
    pub ratio: f64,
    /// `None` whenever a guard fired and `ratio` is 0 by policy.
    pub zone: Option<AcwrZone>,
}

impl AcwrReport {
    pub fn insufficient_data(&self) -> bool {
        self.days_with_workouts < MIN_CHRONIC_WORKOUT_DAYS
    }
}

pub fn acwr_report(log: &WorkoutLog, reference: NaiveDate) -> AcwrReport {
    let acute = window::aggregate_window(log, Window::Weekly, reference).tonnage;
    let chronic = window::aggregate_window(log, Window::Chronic, reference);

    let mut report = AcwrReport {
        reference,
        acute,
        chronic_tonnage: chronic.tonnage,
        chronic_weekly_average: 0.0,
        days_with_workouts: chronic.days_with_workouts,
        ratio: 0.0,
        zone: None,
    };

    if report.insufficient_data() {
        tracing::debug!(
            %reference,
            days = report.days_with_workouts,
            "not enough trained days for a workload ratio"
        );
        return report;
    }

    report.chronic_weekly_average = chronic.tonnage / WEEKS_PER_CHRONIC_WINDOW;
    if report.chronic_weekly_average > 0.0 {
        report.ratio = acute / report.chronic_weekly_average;
        report.zone = Some(AcwrZone::from_ratio(report.ratio));
    } else {
        tracing::debug!(%reference, "no chronic tonnage, ratio left at 0");
    }
    report
}

pub fn acwr(log: &WorkoutLog, reference: NaiveDate) -> f64 {
    acwr_report(log, reference).ratio
}
