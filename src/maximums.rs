//! Rep-max tables: the heaviest weight lifted for 1 to 10 reps, per exercise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BarlogError, Result};
use crate::models::{OneRMFormula, Set, WorkoutLog};
use crate::utils::calculate_1rm;

pub const MAX_TABLE_REPS: u32 = 10;

type Rows = BTreeMap<String, BTreeMap<u32, f64>>;

/// Serialized as `{ "<exercise>": { "<reps>": weight } }`. Loading applies
/// the same checks as [`RepMaxTable::set`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Rows", into = "Rows")]
pub struct RepMaxTable {
    rows: Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OneRmEstimate {
    pub weight: f64,
    pub reps: u32,
    pub estimated_1rm: f64,
}

impl RepMaxTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one cell. A weight of 0 clears it.
    pub fn set(&mut self, exercise: &str, reps: u32, weight: f64) -> Result<()> {
        if !(1..=MAX_TABLE_REPS).contains(&reps) {
            return Err(BarlogError::RepsOutOfRange(reps));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(BarlogError::InvalidWeight(weight));
        }

        if weight == 0.0 {
            if let Some(row) = self.rows.get_mut(exercise) {
                row.remove(&reps);
                if row.is_empty() {
                    self.rows.remove(exercise);
                }
            }
        } else {
            self.rows
                .entry(exercise.to_string())
                .or_default()
                .insert(reps, weight);
        }
        Ok(())
    }

    pub fn get(&self, exercise: &str, reps: u32) -> Option<f64> {
        self.rows.get(exercise)?.get(&reps).copied()
    }

    pub fn row(&self, exercise: &str) -> Option<&BTreeMap<u32, f64>> {
        self.rows.get(exercise)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds a table from logged plain sets. Complex sets are skipped: their
    /// reps are spread over different movements.
    pub fn from_log(log: &WorkoutLog) -> Self {
        let mut table = Self::new();
        for (_, record) in log.iter() {
            for ex in record.exercises.iter().filter(|e| !e.is_complex) {
                for set in &ex.sets {
                    if let Set::Simple { weight, reps } = *set {
                        table.raise(&ex.name, reps, weight);
                    }
                }
            }
        }
        table
    }

    /// Keeps the heavier value of each cell.
    pub fn merge_best(&mut self, other: &RepMaxTable) {
        for (exercise, row) in &other.rows {
            for (reps, weight) in row {
                self.raise(exercise, *reps, *weight);
            }
        }
    }

    fn raise(&mut self, exercise: &str, reps: u32, weight: f64) {
        if !(1..=MAX_TABLE_REPS).contains(&reps) || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        let cell = self
            .rows
            .entry(exercise.to_string())
            .or_default()
            .entry(reps)
            .or_insert(0.0);
        if weight > *cell {
            *cell = weight;
        }
    }

    /// The best 1RM estimate across the exercise's row.
    pub fn estimated_1rm(&self, exercise: &str, formula: OneRMFormula) -> Option<OneRmEstimate> {
        self.rows
            .get(exercise)?
            .iter()
            .map(|(reps, weight)| OneRmEstimate {
                weight: *weight,
                reps: *reps,
                estimated_1rm: calculate_1rm(*weight, *reps, formula),
            })
            .max_by(|a, b| a.estimated_1rm.total_cmp(&b.estimated_1rm))
    }
}

impl TryFrom<Rows> for RepMaxTable {
    type Error = BarlogError;

    fn try_from(raw: Rows) -> Result<Self> {
        let mut table = Self::new();
        for (exercise, row) in raw {
            for (reps, weight) in row {
                table.set(&exercise, reps, weight)?;
            }
        }
        Ok(table)
    }
}

impl From<RepMaxTable> for Rows {
    fn from(table: RepMaxTable) -> Self {
        table.rows
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::Exercise;

    use super::*;

    #[test]
    fn set_validates_and_clears() {
        let mut table = RepMaxTable::new();
        table.set("Back Squat", 1, 180.0).unwrap();
        table.set("Back Squat", 5, 150.0).unwrap();
        assert_eq!(table.get("Back Squat", 5), Some(150.0));

        assert!(matches!(table.set("Back Squat", 0, 100.0), Err(BarlogError::RepsOutOfRange(0))));
        assert!(matches!(table.set("Back Squat", 11, 100.0), Err(BarlogError::RepsOutOfRange(11))));
        assert!(table.set("Back Squat", 3, -5.0).is_err());

        table.set("Back Squat", 5, 0.0).unwrap();
        assert_eq!(table.get("Back Squat", 5), None);
        table.set("Back Squat", 1, 0.0).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn from_log_keeps_heaviest_simple_set_per_rep_count() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut log = WorkoutLog::new();
        log.add_exercise(
            d,
            Exercise::simple("Back Squat").with_sets([
                Set::simple(140.0, 5),
                Set::simple(150.0, 5),
                Set::simple(170.0, 1),
                Set::simple(100.0, 15),
            ]),
        );
        log.add_exercise(
            d.succ_opt().unwrap(),
            Exercise::named("Clean and Jerk").with_sets([Set::complex(120.0, vec![1, 1])]),
        );

        let table = RepMaxTable::from_log(&log);
        assert_eq!(table.get("Back Squat", 5), Some(150.0));
        assert_eq!(table.get("Back Squat", 1), Some(170.0));
        assert_eq!(table.get("Back Squat", 15), None);
        assert!(table.row("Clean and Jerk").is_none());
    }

    #[test]
    fn merge_keeps_heavier_cells() {
        let mut a = RepMaxTable::new();
        a.set("Press", 1, 80.0).unwrap();
        a.set("Press", 3, 70.0).unwrap();
        let mut b = RepMaxTable::new();
        b.set("Press", 1, 85.0).unwrap();
        b.set("Press", 3, 65.0).unwrap();
        b.set("Row", 8, 90.0).unwrap();

        a.merge_best(&b);
        assert_eq!(a.get("Press", 1), Some(85.0));
        assert_eq!(a.get("Press", 3), Some(70.0));
        assert_eq!(a.get("Row", 8), Some(90.0));
    }

    #[test]
    fn estimate_picks_the_strongest_cell() {
        let mut table = RepMaxTable::new();
        table.set("Back Squat", 1, 150.0).unwrap();
        table.set("Back Squat", 5, 140.0).unwrap();

        let best = table.estimated_1rm("Back Squat", OneRMFormula::Epley).unwrap();
        assert_eq!(best.reps, 5);
        assert!((best.estimated_1rm - 163.333).abs() < 0.01);
        assert!(table.estimated_1rm("Deadlift", OneRMFormula::Epley).is_none());
    }

    #[test]
    fn serializes_as_nested_object() {
        let mut table = RepMaxTable::new();
        table.set("Snatch", 2, 90.0).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!({"Snatch": {"2": 90.0}}));
        let back: RepMaxTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn loading_rejects_cells_outside_the_table() {
        let bad_reps = serde_json::json!({"Snatch": {"0": 90.0}});
        assert!(serde_json::from_value::<RepMaxTable>(bad_reps).is_err());

        let too_many = serde_json::json!({"Snatch": {"50": 40.0}});
        assert!(serde_json::from_value::<RepMaxTable>(too_many).is_err());

        let negative = serde_json::json!({"Snatch": {"3": -10.0}});
        assert!(serde_json::from_value::<RepMaxTable>(negative).is_err());

        let cleared = serde_json::json!({"Snatch": {"3": 0.0}, "Press": {"1": 60.0}});
        let table: RepMaxTable = serde_json::from_value(cleared).unwrap();
        assert!(table.row("Snatch").is_none());
        assert_eq!(table.get("Press", 1), Some(60.0));
    }
}
