//! Weightlifting training log: tonnage, intensity and workload statistics
//! computed from a per-day log of exercises.
//!
//! The calculators (`tonnage`, `intensity`, `window`, `acwr`) are pure reads
//! of a [`WorkoutLog`] snapshot and never fail: missing numbers count as 0
//! and every division is guarded to return 0.

pub mod acwr;
pub mod analyzer;
pub mod error;
pub mod intensity;
pub mod maximums;
pub mod models;
pub mod nutrition;
pub mod report;
pub mod storage;
pub mod tonnage;
pub mod utils;
pub mod window;
pub mod wire;

pub use acwr::{AcwrReport, AcwrZone, acwr, acwr_report};
pub use error::BarlogError;
pub use intensity::average_intensity;
pub use models::{ComplexPart, DailyRecord, DayStatus, Exercise, Set, WorkoutLog};
pub use tonnage::{
    TonnageBreakdown, exercise_reps, exercise_tonnage, per_part_tonnage, set_reps, set_tonnage,
    tonnage_of,
};
pub use window::{Aggregate, Window, aggregate, aggregate_window, days_with_workouts};
