//! Per-exercise breakdowns over a date range, and a per-day series for trends.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::intensity::{average_intensity, intensity_or_zero};
use crate::models::WorkoutLog;
use crate::tonnage::{exercise_reps, exercise_tonnage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub sets: u64,
    pub reps: u64,
    pub tonnage: f64,
    pub average_intensity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Days in range that have a record at all, trained or not.
    pub total_days: u32,
    pub total_sets: u64,
    pub total_reps: u64,
    pub total_tonnage: f64,
    pub average_intensity: f64,
    pub per_exercise: BTreeMap<String, ExerciseStats>,
}

/// Breaks `start..=end` down by exercise name. Only exercises named in
/// `selection` contribute; an empty selection takes every exercise.
/// Selected names that never appear still get a zeroed entry.
pub fn analyze(log: &WorkoutLog, start: NaiveDate, end: NaiveDate, selection: &[String]) -> Analysis {
    let selected = |name: &str| selection.is_empty() || selection.iter().any(|s| s == name);

    let mut analysis = Analysis {
        start: Some(start),
        end: Some(end),
        per_exercise: selection
            .iter()
            .map(|name| (name.clone(), ExerciseStats::default()))
            .collect(),
        ..Analysis::default()
    };

    for (_, record) in log.range(start, end) {
        analysis.total_days += 1;

        for ex in record.exercises.iter().filter(|ex| selected(&ex.name)) {
            let sets = ex.sets.len() as u64;
            let reps = exercise_reps(ex);
            let tonnage = exercise_tonnage(ex);

            let stats = analysis.per_exercise.entry(ex.name.clone()).or_default();
            stats.sets += sets;
            stats.reps += reps;
            stats.tonnage += tonnage;

            analysis.total_sets += sets;
            analysis.total_reps += reps;
            analysis.total_tonnage += tonnage;
        }
    }

    for stats in analysis.per_exercise.values_mut() {
        stats.average_intensity = intensity_or_zero(stats.tonnage, stats.reps);
    }
    analysis.average_intensity = intensity_or_zero(analysis.total_tonnage, analysis.total_reps);
    analysis
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub exercises: usize,
    pub sets: u64,
    pub reps: u64,
    pub tonnage: f64,
    pub avg_intensity: f64,
}

/// One entry per logged day, oldest first.
pub fn daily_series(log: &WorkoutLog) -> Vec<DayStats> {
    log.iter()
        .map(|(date, record)| DayStats {
            date: *date,
            exercises: record.exercises.len(),
            sets: record.exercises.iter().map(|e| e.sets.len() as u64).sum(),
            reps: record.exercises.iter().map(exercise_reps).sum(),
            tonnage: record.exercises.iter().map(exercise_tonnage).sum(),
            avg_intensity: average_intensity(&record.exercises),
        })
        .collect()
}

/// Distinct exercise names in the log, sorted.
pub fn exercise_names(log: &WorkoutLog) -> BTreeSet<String> {
    log.iter()
        .flat_map(|(_, record)| record.exercises.iter().map(|e| e.name.clone()))
        .collect()
}
