//! Day-by-day training report, the data behind the export screen.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::intensity::intensity_or_zero;
use crate::models::{Exercise, Set, WorkoutLog};
use crate::tonnage::{PartTonnage, exercise_reps, exercise_tonnage, per_part_tonnage, set_reps, set_tonnage};
use crate::window::{self, Aggregate, has_workout};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRow {
    pub index: usize,
    pub weight: f64,
    pub reps: u64,
    /// `(3+2) 5` for complex sets, `5` otherwise.
    pub reps_display: String,
    pub tonnage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseReport {
    pub name: String,
    pub rows: Vec<SetRow>,
    pub sets: u64,
    pub reps: u64,
    pub tonnage: f64,
    pub avg_intensity: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<PartTonnage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseReport>,
    pub totals: Aggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayReport>,
    pub summary: Aggregate,
}

fn reps_display(set: &Set, exercise: &Exercise) -> String {
    let total = set_reps(set, exercise);
    match set {
        Set::Complex { part_reps, .. } if exercise.is_complex => {
            let n = exercise.part_count().unwrap_or(part_reps.len());
            format!("({}) {}", part_reps.iter().take(n).join("+"), total)
        }
        _ => total.to_string(),
    }
}

fn exercise_report(exercise: &Exercise) -> ExerciseReport {
    let rows = exercise
        .sets
        .iter()
        .enumerate()
        .map(|(i, set)| SetRow {
            index: i + 1,
            weight: set.weight(),
            reps: set_reps(set, exercise),
            reps_display: reps_display(set, exercise),
            tonnage: set_tonnage(set, exercise),
        })
        .collect();

    let reps = exercise_reps(exercise);
    let tonnage = exercise_tonnage(exercise);
    ExerciseReport {
        name: exercise.name.clone(),
        rows,
        sets: exercise.sets.len() as u64,
        reps,
        tonnage,
        avg_intensity: intensity_or_zero(tonnage, reps),
        parts: per_part_tonnage(exercise),
    }
}

/// Builds the report for `start..=end`. Only days with at least one exercise
/// get a section; the summary covers every day in range.
pub fn build_report(log: &WorkoutLog, start: NaiveDate, end: NaiveDate) -> Report {
    let days = log
        .range(start, end)
        .filter(|(_, record)| has_workout(Some(record)))
        .map(|(date, record)| DayReport {
            date: *date,
            exercises: record.exercises.iter().map(exercise_report).collect(),
            totals: window::aggregate(log, *date, *date),
        })
        .collect();

    Report {
        start,
        end,
        days,
        summary: window::aggregate(log, start, end),
    }
}
