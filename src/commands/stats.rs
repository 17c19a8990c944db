use anyhow::Result;
use barlog::{
    acwr::{AcwrReport, AcwrZone, MIN_CHRONIC_WORKOUT_DAYS, acwr_report},
    utils::format_thousands,
    window::{Aggregate, Window, aggregate},
};
use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{
    commands::{date_or_today, load_log},
    types::{OutputFmt, Settings, emit},
};

#[derive(Serialize)]
struct StatsJson {
    window: Window,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(flatten)]
    stats: Aggregate,
}

pub fn handle(settings: &Settings, window: Window, date: Option<&str>, fmt: OutputFmt) -> Result<()> {
    let reference = date_or_today(date)?;
    let log = load_log(settings)?;
    let (start, end) = window.bounds(reference);
    let stats = aggregate(&log, start, end);
    tracing::info!(%window, %start, %end, "computed stats");

    let out = StatsJson { window, start, end, stats };
    emit(fmt, &out, || {
        let title = match window {
            Window::Daily => format!("Daily ({})", start),
            Window::Weekly => format!("Weekly ({} → {})", start, end),
            Window::Monthly => format!("Monthly ({})", start.format("%B %Y")),
            Window::Chronic => format!("Last 28 days ({} → {})", start, end),
        };
        println!("{}", title.cyan().bold());
        print_aggregate(&stats);
    })
}

pub fn print_aggregate(stats: &Aggregate) {
    println!("  {:<12} {}", "Sets".dimmed(), stats.sets.to_string().bold());
    println!("  {:<12} {}", "Reps".dimmed(), format_thousands(stats.reps as f64).bold());
    println!("  {:<12} {} kg", "Tonnage".dimmed(), format_thousands(stats.tonnage).bold());
    println!(
        "  {:<12} {} kg",
        "Intensity".dimmed(),
        format_thousands(stats.avg_intensity).bold()
    );
    println!(
        "  {:<12} {} / {}",
        "Trained".dimmed(),
        stats.days_with_workouts.to_string().green(),
        stats.days
    );
}

pub fn zone_label(zone: AcwrZone) -> ColoredString {
    match zone {
        AcwrZone::Undertrained => zone.as_str().blue(),
        AcwrZone::Optimal => zone.as_str().green(),
        AcwrZone::Caution => zone.as_str().yellow(),
        AcwrZone::HighRisk => zone.as_str().red().bold(),
    }
}

pub fn handle_acwr(settings: &Settings, date: Option<&str>, fmt: OutputFmt) -> Result<()> {
    let reference = date_or_today(date)?;
    let log = load_log(settings)?;
    let report = acwr_report(&log, reference);

    emit(fmt, &report, || print_acwr(&report))
}

fn print_acwr(report: &AcwrReport) {
    println!("{} {}", "ACWR".cyan().bold(), report.reference.to_string().dimmed());
    println!("  {:<16} {} kg", "Acute (7d)".dimmed(), format_thousands(report.acute));
    println!(
        "  {:<16} {} kg",
        "Chronic (28d)".dimmed(),
        format_thousands(report.chronic_tonnage)
    );

    if report.insufficient_data() {
        println!(
            "  {:<16} {} {}",
            "Ratio".dimmed(),
            "–".bold(),
            format!(
                "(only {} of {} required trained days)",
                report.days_with_workouts, MIN_CHRONIC_WORKOUT_DAYS
            )
            .dimmed()
        );
        return;
    }

    println!(
        "  {:<16} {} kg",
        "Chronic / week".dimmed(),
        format_thousands(report.chronic_weekly_average)
    );
    match report.zone {
        Some(zone) => println!(
            "  {:<16} {} {}",
            "Ratio".dimmed(),
            format!("{:.2}", report.ratio).bold(),
            zone_label(zone)
        ),
        None => println!("  {:<16} {}", "Ratio".dimmed(), "–".bold()),
    }
}
