use barlog::{
    DailyRecord, Exercise, Set, WorkoutLog, acwr, acwr_report, aggregate, average_intensity,
    exercise_reps, exercise_tonnage, intensity::intensity_or_zero, set_reps, set_tonnage,
    tonnage_of,
};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn squat(sets: &[(f64, u32)]) -> Exercise {
    Exercise::simple("Back Squat").with_sets(sets.iter().map(|&(w, r)| Set::simple(w, r)))
}

#[test]
fn single_simple_exercise() {
    let ex = squat(&[(100.0, 5)]);
    assert_eq!(exercise_tonnage(&ex), 500.0);
    assert_eq!(exercise_reps(&ex), 5);
    assert_eq!(average_intensity(&[ex]), 100.0);
}

#[test]
fn clean_and_jerk_from_stored_json() {
    let ex: Exercise = serde_json::from_value(json!({
        "name": "Clean and Jerk",
        "isComplex": true,
        "complexParts": [{"name": "Clean", "orderIndex": 0}, {"name": "Jerk", "orderIndex": 1}],
        "sets": [
            {"weight": 80, "exercise0Reps": 3, "exercise1Reps": 2},
            {"weight": 85, "exercise0Reps": 2, "exercise1Reps": 2}
        ]
    }))
    .unwrap();

    assert_eq!(exercise_reps(&ex), 9);
    assert_eq!(exercise_tonnage(&ex), 740.0);
    let avg = average_intensity(std::slice::from_ref(&ex));
    assert!((avg - 740.0 / 9.0).abs() < 1e-9);
}

#[test]
fn complex_set_decomposes_into_parts() {
    let ex = Exercise::complex("Clean and Jerk", &["Clean", "Jerk"])
        .with_sets([Set::complex(100.0, vec![2, 1])]);
    assert_eq!(set_reps(&ex.sets[0], &ex), 3);
    assert_eq!(set_tonnage(&ex.sets[0], &ex), 300.0);
}

#[test]
fn week_with_two_training_days() {
    let mut log = WorkoutLog::new();
    log.add_exercise(date("2024-05-02"), squat(&[(100.0, 5), (100.0, 5)]));
    log.add_exercise(date("2024-05-05"), squat(&[(50.0, 10)]));
    // Outside the window.
    log.add_exercise(date("2024-04-30"), squat(&[(200.0, 1)]));

    let week = aggregate(&log, date("2024-05-01"), date("2024-05-07"));
    assert_eq!(week.tonnage, 1500.0);
    assert_eq!(week.sets, 3);
    assert_eq!(week.reps, 20);
    assert_eq!(week.avg_intensity, 75.0);
    assert_eq!(week.days, 7);
    assert_eq!(week.days_with_workouts, 2);
}

#[test]
fn acwr_needs_seven_trained_days() {
    let reference = date("2024-06-28");
    let mut log = WorkoutLog::new();
    for offset in [0, 3, 9, 15, 22] {
        let day = reference.checked_sub_days(Days::new(offset)).unwrap();
        log.add_exercise(day, squat(&[(250.0, 10); 10]));
    }

    assert_eq!(acwr(&log, reference), 0.0);
    let report = acwr_report(&log, reference);
    assert!(report.insufficient_data());
    assert_eq!(report.zone, None);
}

#[test]
fn acwr_compares_acute_week_to_chronic_weekly_average() {
    let reference = date("2024-06-28");
    let mut log = WorkoutLog::new();
    // One 1000 kg session every other day for 28 days: 14 days trained.
    for offset in (0..28).step_by(2) {
        let day = reference.checked_sub_days(Days::new(offset)).unwrap();
        log.add_exercise(day, squat(&[(100.0, 10)]));
    }

    let report = acwr_report(&log, reference);
    // Acute window D-6..D holds offsets 0, 2, 4, 6.
    assert_eq!(report.acute, 4000.0);
    assert_eq!(report.chronic_tonnage, 14_000.0);
    assert_eq!(report.chronic_weekly_average, 3500.0);
    assert!((report.ratio - 4000.0 / 3500.0).abs() < 1e-9);
}

#[test]
fn missing_and_macro_only_days_contribute_nothing() {
    let mut log = WorkoutLog::new();
    log.add_exercise(date("2024-01-10"), squat(&[(100.0, 3)]));
    log.insert(date("2024-01-11"), DailyRecord::default());

    let with_gaps = aggregate(&log, date("2024-01-01"), date("2024-01-31"));
    let just_day = aggregate(&log, date("2024-01-10"), date("2024-01-10"));
    assert_eq!(with_gaps.tonnage, just_day.tonnage);
    assert_eq!(with_gaps.sets, 1);
    assert_eq!(with_gaps.days_with_workouts, 1);
}

#[test]
fn intensity_is_zero_without_reps() {
    assert_eq!(average_intensity(&[]), 0.0);
    assert_eq!(average_intensity(&[squat(&[(100.0, 0), (120.0, 0)])]), 0.0);

    let cj = Exercise::named("Clean and Jerk").with_sets([Set::complex(100.0, vec![0, 0])]);
    assert_eq!(average_intensity(&[cj]), 0.0);
    assert_eq!(intensity_or_zero(500.0, 0), 0.0);
}

#[test]
fn log_survives_a_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("athlete").join("workouts.json");

    let mut log = WorkoutLog::new();
    log.add_exercise(date("2024-02-01"), squat(&[(140.0, 3)]));
    log.add_exercise(
        date("2024-02-01"),
        Exercise::named("Clean and Jerk").with_sets([Set::complex(110.0, vec![1, 2])]),
    );
    barlog::storage::save_log(&path, &log).unwrap();

    let loaded = barlog::storage::load_log(&path).unwrap();
    assert_eq!(loaded, log);
    assert_eq!(tonnage_of(&loaded.get(date("2024-02-01")).unwrap().exercises).total, 750.0);
}

fn arb_set() -> impl Strategy<Value = (u32, u32)> {
    (0u32..300, 0u32..12)
}

fn arb_exercise() -> impl Strategy<Value = Exercise> {
    (any::<bool>(), prop::collection::vec((0u32..300, 0u32..6, 0u32..6), 0..6)).prop_map(|(complex, sets)| {
        if complex {
            Exercise::named("Clean and Jerk")
                .with_sets(sets.into_iter().map(|(w, a, b)| Set::complex(w as f64, vec![a, b])))
        } else {
            Exercise::simple("Snatch")
                .with_sets(sets.into_iter().map(|(w, a, _)| Set::simple(w as f64, a)))
        }
    })
}

proptest! {
    #[test]
    fn set_order_does_not_change_totals(
        (sets, shuffled) in prop::collection::vec(arb_set(), 0..12)
            .prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle()))
    ) {
        let as_kg = |s: &[(u32, u32)]| s.iter().map(|&(w, r)| (w as f64, r)).collect::<Vec<_>>();
        let original = squat(&as_kg(&sets));
        let permuted = squat(&as_kg(&shuffled));

        prop_assert_eq!(exercise_tonnage(&original), exercise_tonnage(&permuted));
        prop_assert_eq!(exercise_reps(&original), exercise_reps(&permuted));
    }

    #[test]
    fn exercise_order_does_not_change_totals(
        exercises in prop::collection::vec(arb_exercise(), 0..6),
        rotate in 0usize..6,
    ) {
        let mut shuffled = exercises.clone();
        if !shuffled.is_empty() {
            let k = rotate % shuffled.len();
            shuffled.rotate_left(k);
        }
        shuffled.reverse();

        let a = tonnage_of(&exercises);
        let b = tonnage_of(&shuffled);
        prop_assert_eq!(a.total, b.total);
        prop_assert_eq!(a.per_exercise_name, b.per_exercise_name);
        prop_assert_eq!(average_intensity(&exercises), average_intensity(&shuffled));
    }

    #[test]
    fn adjacent_ranges_add_up(
        days in prop::collection::btree_map(0u64..60, prop::collection::vec(arb_set(), 1..4), 0..30),
        d1 in 0u64..60,
        span_a in 0u64..30,
        span_b in 1u64..30,
    ) {
        let origin = date("2024-01-01");
        let at = |offset: u64| origin.checked_add_days(Days::new(offset)).unwrap();

        let log: WorkoutLog = days
            .into_iter()
            .map(|(offset, sets)| {
                let ex = squat(&sets.iter().map(|&(w, r)| (w as f64, r)).collect::<Vec<_>>());
                (at(offset), DailyRecord::with_exercises(vec![ex]))
            })
            .collect();

        let (start, mid) = (at(d1), at(d1 + span_a));
        let end = at(d1 + span_a + span_b);
        let after_mid = at(d1 + span_a + 1);

        let whole = aggregate(&log, start, end);
        let left = aggregate(&log, start, mid);
        let right = aggregate(&log, after_mid, end);
        prop_assert_eq!(whole.tonnage, left.tonnage + right.tonnage);
        prop_assert_eq!(whole.reps, left.reps + right.reps);
        prop_assert_eq!(whole.sets, left.sets + right.sets);
    }

    #[test]
    fn sparse_chronic_window_has_no_ratio(
        offsets in prop::collection::btree_set(0u64..28, 0..7),
        weight in 1u32..500,
    ) {
        let reference = date("2024-09-30");
        let mut log = WorkoutLog::new();
        for offset in offsets {
            let day = reference.checked_sub_days(Days::new(offset)).unwrap();
            log.add_exercise(day, squat(&[(weight as f64, 5)]));
        }
        prop_assert_eq!(acwr(&log, reference), 0.0);
    }
}
