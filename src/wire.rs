//! JSON shape shared with the web client and its backend.
//!
//! Sets arrive with dynamically named rep fields (`exercise0Reps`,
//! `exercise1Reps`, ...) or, from the server, a `parts: [{reps}]` array.
//! Numeric fields are read leniently: anything that is not a usable
//! non-negative number becomes 0 so half-entered records still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{ComplexPart, Exercise, Set};

const PART_PREFIX: &str = "exercise";
const PART_SUFFIX: &str = "Reps";
/// Highest number of part slots read from `exercise{i}Reps` keys. Keys with
/// a larger index are ignored.
pub const MAX_PART_SLOTS: usize = 32;

/// Treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lenient non-negative number: numbers and numeric strings pass, everything
/// else (including negatives and NaN) is 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_f64).unwrap_or(0.0))
}

pub fn coerce_f64(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n >= 0.0 { n } else { 0.0 }
}

/// Rep counts are whole numbers; fractional input is truncated.
pub fn coerce_u32(value: &Value) -> u32 {
    coerce_f64(value).trunc().min(u32::MAX as f64) as u32
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPart {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<Value>,
}

/// A set exactly as stored: an open object so unknown keys do not fail the
/// load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSet(pub Map<String, Value>);

impl RawSet {
    fn weight(&self) -> f64 {
        self.0.get("weight").map(coerce_f64).unwrap_or(0.0)
    }

    fn reps(&self) -> u32 {
        self.0.get("reps").map(coerce_u32).unwrap_or(0)
    }

    /// Per-part reps from `exercise{i}Reps` keys, falling back to a `parts`
    /// array. Gaps in the indices read as 0.
    fn part_reps(&self) -> Vec<u32> {
        let keyed: BTreeMap<usize, u32> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let idx = key
                    .strip_prefix(PART_PREFIX)?
                    .strip_suffix(PART_SUFFIX)?
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < MAX_PART_SLOTS)?;
                Some((idx, coerce_u32(value)))
            })
            .collect();

        let mut parts = match keyed.last_key_value() {
            Some((&last, _)) => {
                let mut slots = vec![0; last + 1];
                for (idx, reps) in keyed {
                    slots[idx] = reps;
                }
                slots
            }
            None => Vec::new(),
        };

        if parts.is_empty() {
            if let Some(Value::Array(items)) = self.0.get("parts") {
                parts = items
                    .iter()
                    .map(|p| p.get("reps").map(coerce_u32).unwrap_or(0))
                    .collect();
            }
        }
        parts
    }

    /// Complex sets read only part values and simple sets only `reps`; the
    /// other shape's fields count for nothing.
    fn into_set(self, is_complex: bool) -> Set {
        let weight = self.weight();
        if is_complex {
            Set::complex(weight, self.part_reps())
        } else {
            Set::simple(weight, self.reps())
        }
    }

    fn from_set(set: &Set) -> Self {
        let mut map = Map::new();
        map.insert("weight".into(), Value::from(set.weight()));
        match set {
            Set::Simple { reps, .. } => {
                map.insert("reps".into(), Value::from(*reps));
            }
            Set::Complex { part_reps, .. } => {
                // The combined count is kept for clients that only read `reps`.
                let total: u64 = part_reps.iter().map(|&r| u64::from(r)).sum();
                map.insert("reps".into(), Value::from(total));
                for (i, reps) in part_reps.iter().enumerate() {
                    map.insert(format!("{PART_PREFIX}{i}{PART_SUFFIX}"), Value::from(*reps));
                }
            }
        }
        Self(map)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complex: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_parts: Option<Vec<RawPart>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: Vec<RawSet>,
}

impl From<RawExercise> for Exercise {
    fn from(raw: RawExercise) -> Self {
        let is_complex = raw.is_complex.as_ref().is_some_and(coerce_bool);
        let complex_parts = raw
            .complex_parts
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, p)| ComplexPart {
                name: p.name,
                order_index: p.order_index.as_ref().map(coerce_u32).unwrap_or(i as u32),
            })
            .collect();

        let mut exercise = Exercise {
            id: raw
                .id
                .as_ref()
                .and_then(coerce_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: raw.name,
            is_complex,
            complex_parts,
            sets: raw.sets.into_iter().map(|s| s.into_set(is_complex)).collect(),
        };
        exercise.normalize();
        exercise
    }
}

impl From<Exercise> for RawExercise {
    fn from(exercise: Exercise) -> Self {
        let complex_parts = (!exercise.complex_parts.is_empty()).then(|| {
            exercise
                .complex_parts
                .iter()
                .map(|p| RawPart {
                    name: p.name.clone(),
                    order_index: Some(Value::from(p.order_index)),
                })
                .collect()
        });

        Self {
            id: Some(Value::String(exercise.id)),
            name: exercise.name,
            is_complex: Some(Value::Bool(exercise.is_complex)),
            complex_parts,
            sets: exercise.sets.iter().map(RawSet::from_set).collect(),
        }
    }
}
