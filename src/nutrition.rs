use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WorkoutLog;
use crate::wire::lenient_f64;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily macronutrients in grams. Not part of training load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroData {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat: f64,
}

impl MacroData {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self { protein, carbs, fat }
    }

    pub fn calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN + self.carbs * KCAL_PER_G_CARBS + self.fat * KCAL_PER_G_FAT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroSummary {
    pub days_logged: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
}

impl MacroSummary {
    /// Per-day average over the days that had macros logged.
    pub fn daily_average(&self) -> MacroSummary {
        if self.days_logged == 0 {
            return MacroSummary::default();
        }
        let n = self.days_logged as f64;
        MacroSummary {
            days_logged: self.days_logged,
            protein: self.protein / n,
            carbs: self.carbs / n,
            fat: self.fat / n,
            calories: self.calories / n,
        }
    }
}

/// Sums logged macros over `start..=end`.
pub fn macro_totals(log: &WorkoutLog, start: NaiveDate, end: NaiveDate) -> MacroSummary {
    log.range(start, end)
        .filter_map(|(_, record)| record.macros)
        .fold(MacroSummary::default(), |mut acc, m| {
            acc.days_logged += 1;
            acc.protein += m.protein;
            acc.carbs += m.carbs;
            acc.fat += m.fat;
            acc.calories += m.calories();
            acc
        })
}

#[cfg(test)]
mod tests {
    use crate::models::DailyRecord;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn calories_use_atwater_factors() {
        assert_eq!(MacroData::new(150.0, 250.0, 60.0).calories(), 600.0 + 1000.0 + 540.0);
        assert_eq!(MacroData::default().calories(), 0.0);
    }

    #[test]
    fn totals_skip_days_without_macros() {
        let mut log = WorkoutLog::new();
        log.record_mut(date("2024-05-01")).macros = Some(MacroData::new(100.0, 200.0, 50.0));
        log.record_mut(date("2024-05-02")).macros = Some(MacroData::new(200.0, 100.0, 70.0));
        log.insert(date("2024-05-03"), DailyRecord::default());
        log.record_mut(date("2024-06-01")).macros = Some(MacroData::new(999.0, 0.0, 0.0));

        let totals = macro_totals(&log, date("2024-05-01"), date("2024-05-31"));
        assert_eq!(totals.days_logged, 2);
        assert_eq!(totals.protein, 300.0);
        assert_eq!(totals.fat, 120.0);

        let avg = totals.daily_average();
        assert_eq!(avg.protein, 150.0);
        assert_eq!(avg.calories, totals.calories / 2.0);
        assert_eq!(MacroSummary::default().daily_average(), MacroSummary::default());
    }
}
