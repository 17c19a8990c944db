use anyhow::Result;
use barlog::{
    analyzer::{Analysis, DayStats, analyze, daily_series, exercise_names},
    nutrition::{MacroSummary, macro_totals},
    utils::format_thousands,
};
use colored::Colorize;
use serde::Serialize;

use crate::{
    commands::{date_range, load_log},
    types::{OutputFmt, Settings, best_exercise_suggestion, emit, plain_len},
};

#[derive(Serialize)]
struct AnalyzeJson<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    /// Per-day averages over days with macros logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    macros: Option<MacroSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    days: Vec<DayStats>,
}

fn print_days(days: &[DayStats]) {
    println!();
    println!("{}", "Daily:".cyan().bold());
    for d in days {
        println!(
            "  {} {:>2} ex  {:>3} sets  {:>9} kg  {:>5} kg avg",
            d.date.format("%a %b %d").to_string().green(),
            d.exercises,
            d.sets,
            format_thousands(d.tonnage),
            format_thousands(d.avg_intensity)
        );
    }
}

pub fn handle(
    settings: &Settings,
    from: &str,
    to: &str,
    exercises: Vec<String>,
    daily: bool,
    fmt: OutputFmt,
) -> Result<()> {
    let (start, end) = date_range(from, to)?;
    let log = load_log(settings)?;

    let known = exercise_names(&log);
    for name in exercises.iter().filter(|n| !known.contains(*n)) {
        match best_exercise_suggestion(name, known.iter().map(String::as_str)) {
            Some(s) => eprintln!(
                "{} no exercise named \"{}\" in the log, did you mean \"{}\"?",
                "warning:".yellow().bold(),
                name,
                s.green()
            ),
            None => eprintln!(
                "{} no exercise named \"{}\" in the log",
                "warning:".yellow().bold(),
                name
            ),
        }
    }

    let analysis = analyze(&log, start, end, &exercises);
    let macros = macro_totals(&log, start, end);
    let days: Vec<DayStats> = if daily {
        daily_series(&log)
            .into_iter()
            .filter(|d| (start..=end).contains(&d.date))
            .collect()
    } else {
        Vec::new()
    };

    let out = AnalyzeJson {
        analysis: &analysis,
        macros: (macros.days_logged > 0).then(|| macros.daily_average()),
        days,
    };

    emit(fmt, &out, || {
        println!("{} {} → {}", "Analysis".cyan().bold(), start, end);
        println!(
            "  {} days logged, {} sets",
            analysis.total_days.to_string().bold(),
            analysis.total_sets.to_string().bold()
        );
        println!(
            "  {} kg tonnage, {} reps, {} kg avg intensity",
            format_thousands(analysis.total_tonnage).bold(),
            format_thousands(analysis.total_reps as f64).bold(),
            format_thousands(analysis.average_intensity).bold()
        );

        if let Some(m) = out.macros {
            println!(
                "  {} {:.0}p / {:.0}c / {:.0}f, {} kcal per day ({} days)",
                "Macros:".blue().bold(),
                m.protein,
                m.carbs,
                m.fat,
                format_thousands(m.calories),
                m.days_logged
            );
        }

        if analysis.per_exercise.is_empty() {
            println!("{}", "  (no exercises in range)".dimmed());
            return;
        }

        println!();
        println!("{}", "Exercise breakdown:".cyan().bold());
        let rows: Vec<String> = analysis
            .per_exercise
            .keys()
            .map(|name| format!(" • {}", name.bold()))
            .collect();
        let pad = rows.iter().map(|r| plain_len(r)).max().unwrap_or(0);

        for (row, stats) in rows.iter().zip(analysis.per_exercise.values()) {
            let total_pad = pad + row.len() - plain_len(row);
            println!(
                "{:<total_pad$} {} {:>9} kg  {:>6} reps  {:>4} sets  {:>5} kg avg",
                row,
                "|".blue(),
                format_thousands(stats.tonnage),
                stats.reps,
                stats.sets,
                format_thousands(stats.average_intensity),
                total_pad = total_pad
            );
        }

        if !out.days.is_empty() {
            print_days(&out.days);
        }
    })
}
