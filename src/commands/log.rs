use anyhow::{Context, Result};
use barlog::{
    analyzer::exercise_names,
    models::{DayStatus, Exercise, Set},
    nutrition::MacroData,
    report::{DayReport, build_report},
    storage,
    tonnage::exercise_tonnage,
    utils::format_thousands,
};
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::LogCmd,
    commands::{date_or_today, load_log},
    types::{OutputFmt, Settings, best_exercise_suggestion, emit},
};

#[derive(Serialize)]
struct DayView<'a> {
    date: NaiveDate,
    status: Option<DayStatus>,
    macros: Option<MacroData>,
    calories: Option<f64>,
    workout: Option<&'a DayReport>,
}

pub fn handle(cmd: LogCmd, settings: &Settings, fmt: OutputFmt) -> Result<()> {
    match cmd {
        LogCmd::Show { date } => show(settings, date.as_deref(), fmt),

        LogCmd::Add {
            exercise,
            sets,
            parts,
            date,
        } => {
            let date = date_or_today(date.as_deref())?;
            let sets = sets
                .iter()
                .map(|s| Set::parse(s).with_context(|| format!("bad set `{s}`")))
                .collect::<Result<Vec<_>>>()?;

            let mut log = load_log(settings)?;

            let known = exercise_names(&log);
            if !known.contains(&exercise) {
                if let Some(s) = best_exercise_suggestion(&exercise, known.iter().map(String::as_str)) {
                    println!(
                        "{} `{}` is new to the log, did you mean `{}`?",
                        "warning:".yellow().bold(),
                        exercise,
                        s.green()
                    );
                }
            }

            let base = if parts.is_empty() {
                Exercise::named(&exercise)
            } else {
                Exercise::complex(&exercise, &parts)
            };
            if !base.is_complex && sets.iter().any(Set::is_complex) {
                println!(
                    "{} `{}` is not a complex, part reps are summed (use --parts to split them)",
                    "warning:".yellow().bold(),
                    exercise
                );
            }
            let ex = base.with_sets(sets);
            let tonnage = exercise_tonnage(&ex);
            let set_count = ex.sets.len();

            log.add_exercise(date, ex);
            storage::save_log(&settings.log_path, &log)?;
            tracing::info!(%date, exercise = %exercise, sets = set_count, "logged exercise");

            println!(
                "{} logged {} on {} ({} sets, {} kg)",
                "ok:".green().bold(),
                exercise.bold(),
                date,
                set_count,
                format_thousands(tonnage)
            );
            Ok(())
        }

        LogCmd::Remove { exercise, date } => {
            let date = date_or_today(date.as_deref())?;
            let mut log = load_log(settings)?;

            let Some(record) = log.get(date) else {
                println!("{} nothing logged on {}", "error:".red().bold(), date);
                return Ok(());
            };
            if exercise == 0 || exercise > record.exercises.len() {
                println!(
                    "{} no exercise at index {} on {} ({} logged)",
                    "error:".red().bold(),
                    exercise,
                    date,
                    record.exercises.len()
                );
                return Ok(());
            }

            let removed = log.record_mut(date).exercises.remove(exercise - 1);
            storage::save_log(&settings.log_path, &log)?;
            tracing::info!(%date, exercise = %removed.name, "removed exercise");
            println!(
                "{} removed {} from {}",
                "ok:".green().bold(),
                removed.name.bold(),
                date
            );
            Ok(())
        }

        LogCmd::Macros {
            protein,
            carbs,
            fat,
            date,
        } => {
            if [protein, carbs, fat].iter().any(|g| !g.is_finite() || *g < 0.0) {
                println!("{} macros must be non-negative grams", "error:".red().bold());
                return Ok(());
            }
            let date = date_or_today(date.as_deref())?;
            let mut log = load_log(settings)?;

            let macros = MacroData::new(protein, carbs, fat);
            log.record_mut(date).macros = Some(macros);
            storage::save_log(&settings.log_path, &log)?;
            println!(
                "{} macros for {}: {}p / {}c / {}f = {} kcal",
                "ok:".green().bold(),
                date,
                protein,
                carbs,
                fat,
                format_thousands(macros.calories())
            );
            Ok(())
        }

        LogCmd::Status { status, date } => {
            let date = date_or_today(date.as_deref())?;
            let mut log = load_log(settings)?;

            log.record_mut(date).status = Some(status);
            storage::save_log(&settings.log_path, &log)?;
            println!(
                "{} {} marked {}",
                "ok:".green().bold(),
                date,
                format!("{:?}", status).to_lowercase().cyan()
            );
            Ok(())
        }
    }
}

fn show(settings: &Settings, date: Option<&str>, fmt: OutputFmt) -> Result<()> {
    let date = date_or_today(date)?;
    let log = load_log(settings)?;
    let record = log.get(date);
    let report = build_report(&log, date, date);
    let day = report.days.first();

    let view = DayView {
        date,
        status: record.and_then(|r| r.status),
        macros: record.and_then(|r| r.macros),
        calories: record.and_then(|r| r.macros).map(|m| m.calories()),
        workout: day,
    };

    emit(fmt, &view, || {
        let status = match view.status {
            Some(DayStatus::Planned) => " (planned)".yellow(),
            Some(DayStatus::Completed) => " (completed)".green(),
            None => "".normal(),
        };
        println!(
            "{}{}",
            date.format("%A %b %d, %Y").to_string().cyan().bold(),
            status
        );

        match day {
            None => println!("{}", "  (no exercises logged)".dimmed()),
            Some(day) => {
                for (i, ex) in day.exercises.iter().enumerate() {
                    let idx = format!("{}", i + 1).yellow();
                    println!(
                        "{} • {} — {} sets, {} reps, {} kg",
                        idx,
                        ex.name.bold(),
                        ex.sets,
                        ex.reps,
                        format_thousands(ex.tonnage)
                    );
                    for row in &ex.rows {
                        println!(
                            "    {} {} kg × {}",
                            format!("{}.", row.index).dimmed(),
                            row.weight,
                            row.reps_display
                        );
                    }
                }
                let t = &day.totals;
                println!(
                    "  {} {} kg, {} kg avg",
                    "Total:".green().bold(),
                    format_thousands(t.tonnage),
                    format_thousands(t.avg_intensity)
                );
            }
        }

        if let Some(m) = view.macros {
            println!(
                "  {} {}p / {}c / {}f = {} kcal",
                "Macros:".blue().bold(),
                m.protein,
                m.carbs,
                m.fat,
                format_thousands(m.calories())
            );
        }
    })
}
