use anyhow::Result;
use barlog::{
    maximums::{MAX_TABLE_REPS, RepMaxTable},
    storage,
    utils::format_thousands,
};
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::MaxCmd,
    commands::load_log,
    types::{OutputFmt, Settings, best_exercise_suggestion, emit, plain_len},
};

#[derive(Serialize)]
struct EstimateJson<'a> {
    exercise: &'a str,
    formula: String,
    #[serde(flatten)]
    estimate: barlog::maximums::OneRmEstimate,
}

fn print_table(table: &RepMaxTable, only: Option<&str>) {
    let names: Vec<&str> = table.exercises().filter(|n| only.is_none_or(|o| o == *n)).collect();
    let labels: Vec<String> = names.iter().map(|n| format!(" • {}", n.bold())).collect();
    let pad = labels.iter().map(|l| plain_len(l)).max().unwrap_or(0).max(3);

    let header: String = (1..=MAX_TABLE_REPS).map(|r| format!("{:>7}", format!("{r}RM"))).collect();
    println!("{:<pad$} {}", "", header.dimmed(), pad = pad);

    for (label, name) in labels.iter().zip(&names) {
        let total_pad = pad + label.len() - plain_len(label);
        let cells: String = (1..=MAX_TABLE_REPS)
            .map(|r| match table.get(name, r) {
                Some(w) => format!("{:>7}", format_thousands(w)),
                None => format!("{:>7}", "·"),
            })
            .collect();
        println!("{:<total_pad$} {}", label, cells, total_pad = total_pad);
    }
}

fn suggest(table: &RepMaxTable, exercise: &str) {
    match best_exercise_suggestion(exercise, table.exercises()) {
        Some(s) => println!(
            "{} no maxes for `{}`, did you mean `{}`?",
            "error:".red().bold(),
            exercise,
            s.green()
        ),
        None => println!("{} no maxes for `{}`", "error:".red().bold(), exercise),
    }
}

pub fn handle(cmd: MaxCmd, settings: &Settings, fmt: OutputFmt) -> Result<()> {
    let path = &settings.maximums_path;

    match cmd {
        MaxCmd::Show { exercise } => {
            let table = storage::load_maximums(path)?;
            if let Some(name) = exercise.as_deref() {
                if table.row(name).is_none() {
                    suggest(&table, name);
                    return Ok(());
                }
            }

            emit(fmt, &table, || {
                if table.is_empty() {
                    println!("{}", "(no maxes recorded)".dimmed());
                    return;
                }
                println!("{}", "Rep maxes (kg):".cyan().bold());
                print_table(&table, exercise.as_deref());
            })
        }

        MaxCmd::Set {
            exercise,
            reps,
            weight,
        } => {
            let mut table = storage::load_maximums(path)?;
            table.set(&exercise, reps, weight)?;
            storage::save_maximums(path, &table)?;
            tracing::info!(exercise = %exercise, reps, weight, "rep max set");

            if weight == 0.0 {
                println!("{} cleared {} {}RM", "ok:".green().bold(), exercise.bold(), reps);
            } else {
                println!(
                    "{} {} {}RM = {} kg",
                    "ok:".green().bold(),
                    exercise.bold(),
                    reps,
                    weight
                );
            }
            Ok(())
        }

        MaxCmd::Sync => {
            let log = load_log(settings)?;
            let mut table = storage::load_maximums(path)?;
            let before = table.clone();
            table.merge_best(&RepMaxTable::from_log(&log));

            let mut raised: Vec<(String, u32, f64)> = Vec::new();
            for name in table.exercises() {
                for reps in 1..=MAX_TABLE_REPS {
                    if let Some(now) = table.get(name, reps) {
                        if before.get(name, reps) != Some(now) {
                            raised.push((name.to_string(), reps, now));
                        }
                    }
                }
            }

            if !raised.is_empty() {
                storage::save_maximums(path, &table)?;
            }
            tracing::info!(raised = raised.len(), "synced rep maxes from log");

            emit(fmt, &raised, || {
                if raised.is_empty() {
                    println!("{} table already up to date", "info:".blue().bold());
                    return;
                }
                println!("{}", "New maxes:".cyan().bold());
                for (name, reps, weight) in &raised {
                    println!("  {} {}RM → {} kg", name.bold(), reps, format_thousands(*weight));
                }
            })
        }

        MaxCmd::Estimate { exercise, formula } => {
            let table = storage::load_maximums(path)?;
            let formula = formula.unwrap_or(settings.formula);

            let Some(estimate) = table.estimated_1rm(&exercise, formula) else {
                suggest(&table, &exercise);
                return Ok(());
            };

            let out = EstimateJson {
                exercise: &exercise,
                formula: formula.to_string(),
                estimate,
            };
            emit(fmt, &out, || {
                println!(
                    "{} estimated 1RM: {} kg",
                    exercise.bold(),
                    format_thousands(estimate.estimated_1rm).green().bold()
                );
                println!(
                    "  {}",
                    format!(
                        "from {} kg × {} ({})",
                        estimate.weight, estimate.reps, formula
                    )
                    .dimmed()
                );
            })
        }
    }
}
