use anyhow::Result;
use barlog::{
    report::{DayReport, build_report},
    utils::format_thousands,
};
use colored::Colorize;

use crate::{
    commands::{date_range, load_log, stats::print_aggregate},
    types::{OutputFmt, Settings, emit},
};

fn print_day(day: &DayReport) {
    println!("\n{}", day.date.format("%a %b %d, %Y").to_string().cyan().bold());

    for ex in &day.exercises {
        println!("  {}", ex.name.bold());
        println!(
            "    {}",
            format!("{:>3}  {:>7}  {:>10}  {:>9}", "Set", "Weight", "Reps", "Tonnage").dimmed()
        );
        for row in &ex.rows {
            println!(
                "    {:>3}  {:>7}  {:>10}  {:>9}",
                row.index,
                row.weight,
                row.reps_display,
                format_thousands(row.tonnage)
            );
        }
        println!(
            "    {} {} sets, {} reps, {} kg, {} kg avg",
            "Σ".blue(),
            ex.sets,
            ex.reps,
            format_thousands(ex.tonnage),
            format_thousands(ex.avg_intensity)
        );
        for part in &ex.parts {
            println!(
                "      {} {} kg",
                format!("{}:", part.name).dimmed(),
                format_thousands(part.tonnage)
            );
        }
    }

    let t = &day.totals;
    println!(
        "  {} {} sets, {} reps, {} kg, {} kg avg",
        "Day total:".green().bold(),
        t.sets,
        t.reps,
        format_thousands(t.tonnage),
        format_thousands(t.avg_intensity)
    );
}

pub fn handle(settings: &Settings, from: &str, to: &str, fmt: OutputFmt) -> Result<()> {
    let (start, end) = date_range(from, to)?;
    let log = load_log(settings)?;
    let report = build_report(&log, start, end);
    tracing::info!(%start, %end, days = report.days.len(), "built report");

    emit(fmt, &report, || {
        println!("{} {} → {}", "Training report".cyan().bold(), start, end);
        if report.days.is_empty() {
            println!("{}", "  (no workouts in range)".dimmed());
        }
        for day in &report.days {
            print_day(day);
        }
        println!("\n{}", "Summary:".cyan().bold());
        print_aggregate(&report.summary);
    })
}
