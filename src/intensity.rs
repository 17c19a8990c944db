use crate::models::Exercise;
use crate::tonnage::{exercise_reps, exercise_tonnage};

/// Tonnage per rep, or 0 when there are no reps to divide by.
pub fn intensity_or_zero(tonnage: f64, reps: u64) -> f64 {
    if reps == 0 { 0.0 } else { tonnage / reps as f64 }
}

/// Average absolute intensity (kg per rep) across `exercises`.
/// Zero total reps yields 0 rather than an error.
pub fn average_intensity(exercises: &[Exercise]) -> f64 {
    let (tonnage, reps) = exercises.iter().fold((0.0, 0u64), |(t, r), ex| {
        (t + exercise_tonnage(ex), r + exercise_reps(ex))
    });
    intensity_or_zero(tonnage, reps)
}

#[cfg(test)]
mod tests {
    use crate::models::Set;

    use super::*;

    #[test]
    fn single_exercise_intensity() {
        let squat = Exercise::simple("Back Squat").with_sets([Set::simple(100.0, 5)]);
        assert_eq!(average_intensity(&[squat]), 100.0);
    }

    #[test]
    fn weights_by_reps_not_by_sets() {
        let ex = Exercise::simple("Front Squat")
            .with_sets([Set::simple(100.0, 1), Set::simple(70.0, 9)]);
        assert!((average_intensity(&[ex]) - 73.0).abs() < 1e-9);
    }

    #[test]
    fn zero_reps_yield_zero() {
        assert_eq!(average_intensity(&[]), 0.0);

        let empty = Exercise::simple("Press");
        let zero = Exercise::simple("Row").with_sets([Set::simple(80.0, 0)]);
        let zero_parts = Exercise::named("Clean and Jerk").with_sets([Set::complex(90.0, vec![0, 0])]);
        assert_eq!(average_intensity(&[empty, zero, zero_parts]), 0.0);
    }
}
