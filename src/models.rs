use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BarlogError, Result};
use crate::nutrition::MacroData;
use crate::wire;

/// Multi-movement lifts that are complex by convention when created by name.
/// Part order matches the order the movements are performed in.
pub static RESERVED_COMPLEXES: Lazy<BTreeMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| BTreeMap::from([("clean and jerk", &["Clean", "Jerk"][..])]));

/// One performance of an exercise. The variant must agree with the owning
/// exercise's `is_complex` flag; `Exercise::normalize` repairs disagreements.
#[derive(Debug, Clone, PartialEq)]
pub enum Set {
    Simple { weight: f64, reps: u32 },
    /// One rep count per complex part, indexed like `Exercise::complex_parts`.
    Complex { weight: f64, part_reps: Vec<u32> },
}

impl Set {
    pub fn simple(weight: f64, reps: u32) -> Self {
        Set::Simple { weight, reps }
    }

    pub fn complex(weight: f64, part_reps: impl Into<Vec<u32>>) -> Self {
        Set::Complex {
            weight,
            part_reps: part_reps.into(),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Set::Simple { weight, .. } | Set::Complex { weight, .. } => *weight,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Set::Complex { .. })
    }

    /// Parses the shorthand used on the command line: `100x5` for a plain
    /// set, `80x3+2` for a complex set with one rep count per part.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || BarlogError::InvalidSet(input.to_string());

        let (weight, reps) = input
            .trim()
            .split_once(['x', 'X', '*'])
            .ok_or_else(invalid)?;

        let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid());
        }

        let parts = reps
            .split('+')
            .map(|r| r.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;

        match parts.as_slice() {
            [] => Err(invalid()),
            [reps] => Ok(Set::simple(weight, *reps)),
            _ => Ok(Set::complex(weight, parts)),
        }
    }
}

/// One movement inside a complex exercise, e.g. the "Jerk" of a clean and jerk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPart {
    pub name: String,
    pub order_index: u32,
}

/// A named movement performed on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "wire::RawExercise", into = "wire::RawExercise")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub is_complex: bool,
    pub complex_parts: Vec<ComplexPart>,
    pub sets: Vec<Set>,
}

impl Exercise {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_complex: false,
            complex_parts: Vec::new(),
            sets: Vec::new(),
        }
    }

    pub fn complex<S: AsRef<str>>(name: impl Into<String>, parts: &[S]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_complex: true,
            complex_parts: parts
                .iter()
                .enumerate()
                .map(|(i, p)| ComplexPart {
                    name: p.as_ref().to_string(),
                    order_index: i as u32,
                })
                .collect(),
            sets: Vec::new(),
        }
    }

    /// Creates an exercise by name, making it complex when the name is one of
    /// the reserved multi-movement lifts.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        match RESERVED_COMPLEXES.get(name.trim().to_lowercase().as_str()) {
            Some(parts) => Self::complex(name, *parts),
            None => Self::simple(name),
        }
    }

    pub fn with_sets(mut self, sets: impl IntoIterator<Item = Set>) -> Self {
        for set in sets {
            self.push_set(set);
        }
        self
    }

    pub fn push_set(&mut self, set: Set) {
        let set = self.conform(set);
        self.sets.push(set);
    }

    /// Number of rep slots a complex set carries. `None` when the exercise
    /// declares no parts and recorded part values are taken as-is.
    pub fn part_count(&self) -> Option<usize> {
        if self.is_complex && !self.complex_parts.is_empty() {
            Some(self.complex_parts.len())
        } else {
            None
        }
    }

    /// Brings every set in line with the exercise's variant and part count.
    pub fn normalize(&mut self) {
        let sets = std::mem::take(&mut self.sets);
        self.sets = sets.into_iter().map(|s| self.conform(s)).collect();
    }

    fn conform(&self, set: Set) -> Set {
        let weight = match set.weight() {
            w if w.is_finite() && w >= 0.0 => w,
            _ => 0.0,
        };

        if self.is_complex {
            let mut part_reps = match set {
                Set::Complex { part_reps, .. } => part_reps,
                Set::Simple { reps, .. } => vec![reps],
            };
            if let Some(n) = self.part_count() {
                part_reps.resize(n, 0);
            }
            Set::Complex { weight, part_reps }
        } else {
            let reps = match set {
                Set::Simple { reps, .. } => reps,
                Set::Complex { part_reps, .. } => {
                    part_reps.iter().fold(0u32, |acc, &r| acc.saturating_add(r))
                }
            };
            Set::Simple { weight, reps }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Planned,
    Completed,
}

/// One calendar day's logged activity for one athlete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DayStatus>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroData>,
}

impl DailyRecord {
    pub fn with_exercises(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            ..Self::default()
        }
    }
}

/// Every logged day for one athlete, keyed by calendar date.
/// Serialized as an object keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, DailyRecord>",
    into = "BTreeMap<String, DailyRecord>"
)]
pub struct WorkoutLog {
    days: BTreeMap<NaiveDate, DailyRecord>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DailyRecord)> {
        self.days.iter()
    }

    /// Records whose date falls in `start..=end`. Empty when `start > end`.
    pub fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (&NaiveDate, &DailyRecord)> {
        let bounds = if start <= end { Some(start..=end) } else { None };
        bounds.into_iter().flat_map(|b| self.days.range(b))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn insert(&mut self, date: NaiveDate, record: DailyRecord) -> Option<DailyRecord> {
        self.days.insert(date, record)
    }

    pub fn record_mut(&mut self, date: NaiveDate) -> &mut DailyRecord {
        self.days.entry(date).or_default()
    }

    pub fn add_exercise(&mut self, date: NaiveDate, exercise: Exercise) {
        self.record_mut(date).exercises.push(exercise);
    }
}

impl FromIterator<(NaiveDate, DailyRecord)> for WorkoutLog {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DailyRecord)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, DailyRecord>> for WorkoutLog {
    type Error = BarlogError;

    fn try_from(raw: BTreeMap<String, DailyRecord>) -> Result<Self> {
        let mut days: BTreeMap<NaiveDate, DailyRecord> = BTreeMap::new();
        for (key, record) in raw {
            let date = crate::utils::parse_date(&key)?;
            // Keys that collapse onto the same day (time suffixes) are merged.
            match days.get_mut(&date) {
                Some(existing) => {
                    existing.exercises.extend(record.exercises);
                    existing.status = existing.status.or(record.status);
                    existing.macros = existing.macros.or(record.macros);
                    existing.id = existing.id.take().or(record.id);
                }
                None => {
                    days.insert(date, record);
                }
            }
        }
        Ok(Self { days })
    }
}

impl From<WorkoutLog> for BTreeMap<String, DailyRecord> {
    fn from(log: WorkoutLog) -> Self {
        log.days
            .into_iter()
            .map(|(date, record)| (date.format("%Y-%m-%d").to_string(), record))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OneRMFormula {
    Epley,
    Brzycki,
    Lombardi,
    #[value(name = "oconner")]
    #[serde(rename = "oconner")]
    OConner,
}

impl Display for OneRMFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Epley => "epley",
            Self::Brzycki => "brzycki",
            Self::Lombardi => "lombardi",
            Self::OConner => "oconner",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for OneRMFormula {
    type Err = BarlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "epley" => Ok(Self::Epley),
            "brzycki" => Ok(Self::Brzycki),
            "lombardi" => Ok(Self::Lombardi),
            "oconner" | "o'conner" => Ok(Self::OConner),
            other => Err(BarlogError::UnknownFormula(other.to_string())),
        }
    }
}
