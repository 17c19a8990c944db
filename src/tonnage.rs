//! Tonnage and rep counting for sets, exercises and whole days.
//!
//! Tonnage is Σ weight × reps in kilogram-repetitions. Complex sets count
//! every part's reps against the one shared weight. Nothing here rounds;
//! formatting belongs to whoever displays the number.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Exercise, Set};

/// Reps performed in `set`, read according to `exercise`'s variant.
/// A set of the other variant has no reps of the expected shape and counts 0.
pub fn set_reps(set: &Set, exercise: &Exercise) -> u64 {
    match (exercise.is_complex, set) {
        (true, Set::Complex { part_reps, .. }) => {
            let n = exercise.part_count().unwrap_or(part_reps.len());
            part_reps.iter().take(n).map(|&r| u64::from(r)).sum()
        }
        (false, Set::Simple { reps, .. }) => u64::from(*reps),
        _ => 0,
    }
}

pub fn set_tonnage(set: &Set, exercise: &Exercise) -> f64 {
    let weight = set.weight();
    if !weight.is_finite() || weight < 0.0 {
        return 0.0;
    }
    weight * set_reps(set, exercise) as f64
}

pub fn exercise_tonnage(exercise: &Exercise) -> f64 {
    exercise.sets.iter().map(|s| set_tonnage(s, exercise)).sum()
}

pub fn exercise_reps(exercise: &Exercise) -> u64 {
    exercise
        .sets
        .iter()
        .map(|s| set_reps(s, exercise))
        .sum()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TonnageBreakdown {
    pub total: f64,
    /// Entries sharing a name on the same day accumulate into one figure.
    pub per_exercise_name: BTreeMap<String, f64>,
}

pub fn tonnage_of(exercises: &[Exercise]) -> TonnageBreakdown {
    exercises
        .iter()
        .fold(TonnageBreakdown::default(), |mut acc, ex| {
            let t = exercise_tonnage(ex);
            acc.total += t;
            *acc.per_exercise_name.entry(ex.name.clone()).or_insert(0.0) += t;
            acc
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartTonnage {
    pub name: String,
    pub tonnage: f64,
}

/// Tonnage attributed to each movement of a complex exercise (e.g. cleans
/// vs. jerks). Empty for simple exercises.
pub fn per_part_tonnage(exercise: &Exercise) -> Vec<PartTonnage> {
    if !exercise.is_complex {
        return Vec::new();
    }

    let mut totals = vec![0.0; exercise.complex_parts.len()];
    for set in &exercise.sets {
        let Set::Complex { weight, part_reps } = set else {
            continue;
        };
        for (total, reps) in totals.iter_mut().zip(part_reps) {
            *total += weight * *reps as f64;
        }
    }

    exercise
        .complex_parts
        .iter()
        .zip(totals)
        .map(|(part, tonnage)| PartTonnage {
            name: part.name.clone(),
            tonnage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_and_jerk(sets: Vec<Set>) -> Exercise {
        Exercise::named("Clean and Jerk").with_sets(sets)
    }

    #[test]
    fn complex_set_counts_every_part() {
        let ex = clean_and_jerk(vec![Set::complex(100.0, vec![2, 1])]);
        assert_eq!(set_reps(&ex.sets[0], &ex), 3);
        assert_eq!(set_tonnage(&ex.sets[0], &ex), 300.0);
    }

    #[test]
    fn variant_mismatch_reads_as_zero() {
        let simple = Exercise::simple("Back Squat");
        let complex = Exercise::named("Clean and Jerk");
        assert_eq!(set_reps(&Set::complex(100.0, vec![2, 1]), &simple), 0);
        assert_eq!(set_reps(&Set::simple(100.0, 5), &complex), 0);
    }

    #[test]
    fn part_reps_add_up_past_u32() {
        let ex = clean_and_jerk(vec![Set::complex(2.0, vec![u32::MAX, 1])]);
        assert_eq!(set_reps(&ex.sets[0], &ex), 4_294_967_296);
        assert_eq!(exercise_reps(&ex), 4_294_967_296);
        assert_eq!(set_tonnage(&ex.sets[0], &ex), 8_589_934_592.0);
    }

    #[test]
    fn undeclared_part_slots_are_ignored() {
        // Hand-built set with more slots than the exercise declares.
        let mut ex = Exercise::named("Clean and Jerk");
        ex.sets.push(Set::complex(100.0, vec![1, 1, 5]));
        assert_eq!(exercise_reps(&ex), 2);
        assert_eq!(exercise_tonnage(&ex), 200.0);
    }

    #[test]
    fn tonnage_of_groups_by_name() {
        let day = vec![
            Exercise::simple("Back Squat").with_sets([Set::simple(100.0, 5), Set::simple(110.0, 3)]),
            Exercise::simple("Press").with_sets([Set::simple(50.0, 8)]),
            Exercise::simple("Back Squat").with_sets([Set::simple(90.0, 10)]),
        ];
        let breakdown = tonnage_of(&day);
        assert_eq!(breakdown.total, 500.0 + 330.0 + 400.0 + 900.0);
        assert_eq!(breakdown.per_exercise_name["Back Squat"], 1730.0);
        assert_eq!(breakdown.per_exercise_name["Press"], 400.0);
        assert_eq!(breakdown.per_exercise_name.len(), 2);
    }

    #[test]
    fn tonnage_of_nothing_is_zero() {
        let breakdown = tonnage_of(&[]);
        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.per_exercise_name.is_empty());
    }

    #[test]
    fn per_part_split_sums_to_exercise_tonnage() {
        let ex = clean_and_jerk(vec![Set::complex(80.0, vec![3, 2]), Set::complex(85.0, vec![2, 2])]);
        let parts = per_part_tonnage(&ex);
        assert_eq!(parts[0], PartTonnage { name: "Clean".into(), tonnage: 240.0 + 170.0 });
        assert_eq!(parts[1], PartTonnage { name: "Jerk".into(), tonnage: 160.0 + 170.0 });
        assert_eq!(parts.iter().map(|p| p.tonnage).sum::<f64>(), exercise_tonnage(&ex));

        assert!(per_part_tonnage(&Exercise::simple("Press")).is_empty());
    }
}
