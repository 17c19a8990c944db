use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use barlog::{
    models::OneRMFormula,
    storage::{DEFAULT_LOG_FILE, DEFAULT_MAXIMUMS_FILE},
};
use serde::Serialize;
use strsim::jaro_winkler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFmt {
    Text,
    Json,
}

/// Prints `value` as JSON, or runs `pretty` for the colored text view.
pub fn emit<T: Serialize>(fmt: OutputFmt, value: &T, pretty: impl FnOnce()) -> Result<()> {
    match fmt {
        OutputFmt::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFmt::Text => pretty(),
    }
    Ok(())
}

/// Printable width of a string that may contain ANSI color codes.
pub fn plain_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut count = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1B {
            // Skip \x1b[... m
            while i < bytes.len() && bytes[i] != b'm' {
                i += 1;
            }

            i += 1; // Skip the 'm'
        } else if bytes[i] & 0xC0 != 0x80 {
            count += 1;
            i += 1;
        } else {
            i += 1;
        }
    }

    count
}

/// Return the closest known exercise name for `input`
/// if similarity ≥ 0.85 *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_exercise_suggestion<'a, I>(input: &str, known: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let inp = input.trim().to_lowercase();
    if inp.is_empty() {
        return None;
    }

    // Collect (name, score) pairs.
    let mut scores: Vec<(&'a str, f64)> = known
        .into_iter()
        .map(|name| (name, jaro_winkler(&inp, &name.to_lowercase())))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_score) = *scores.first()?;
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.85;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("barlog").join("config"))
        .context("Could not determine config directory")
}

/// Flat `key = "value"` TOML file.
#[derive(Debug, Default)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

/// Keys the application reads from the config file.
pub const KNOWN_KEYS: [&str; 3] = ["log", "maximums", "formula"];

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let map = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Self { map })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        fs::write(path, toml::to_string(&self.map)?)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Resolves file locations and defaults. `log_override` wins over the
    /// `log` key.
    pub fn settings(&self, log_override: Option<PathBuf>) -> Result<Settings> {
        let formula = match self.map.get("formula") {
            Some(f) => f
                .parse()
                .with_context(|| format!("config key `formula` has bad value `{f}`"))?,
            None => OneRMFormula::Epley,
        };

        Ok(Settings {
            log_path: log_override
                .or_else(|| self.map.get("log").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            maximums_path: self
                .map
                .get("maximums")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MAXIMUMS_FILE)),
            formula,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub log_path: PathBuf,
    pub maximums_path: PathBuf,
    pub formula: OneRMFormula,
}
