use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::maximums::RepMaxTable;
use crate::models::WorkoutLog;

pub const DEFAULT_LOG_FILE: &str = "workouts.json";
pub const DEFAULT_MAXIMUMS_FILE: &str = "maximums.json";

fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> Result<T> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no {what} file yet, starting empty");
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}

fn save<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to save {what} to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved {what}");
    Ok(())
}

/// Loads a workout log. A missing file is an empty log.
pub fn load_log(path: &Path) -> Result<WorkoutLog> {
    let log: WorkoutLog = load_or_default(path, "workout log")?;
    tracing::debug!(path = %path.display(), days = log.len(), "loaded workout log");
    Ok(log)
}

pub fn save_log(path: &Path, log: &WorkoutLog) -> Result<()> {
    save(path, log, "workout log")
}

pub fn load_maximums(path: &Path) -> Result<RepMaxTable> {
    load_or_default(path, "rep-max")
}

pub fn save_maximums(path: &Path, table: &RepMaxTable) -> Result<()> {
    save(path, table, "rep-max table")
}
