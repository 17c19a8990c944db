use anyhow::{Context, Result};
use barlog::{
    models::DayStatus,
    tonnage::tonnage_of,
    utils::{format_thousands, last_of_month},
    window::{Window, aggregate_window, has_workout},
};
use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use crate::{
    commands::{load_log, stats::print_aggregate},
    types::{OutputFmt, Settings, emit},
};

#[derive(Serialize)]
struct CalendarDay {
    date: NaiveDate,
    status: Option<DayStatus>,
    exercises: usize,
    tonnage: f64,
}

pub fn handle(settings: &Settings, year: Option<i32>, month: Option<u32>, fmt: OutputFmt) -> Result<()> {
    // Get current date if year/month not specified
    let now = chrono::Local::now();
    let year = year.unwrap_or(now.year());
    let month = month.unwrap_or(now.month());

    // Validate month
    if !(1..=12).contains(&month) {
        println!("{} month must be between 1 and 12", "error:".red().bold());
        return Ok(());
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("{year}-{month} is not a valid month"))?;
    let last_day = last_of_month(first_day);

    let log = load_log(settings)?;
    let days: Vec<CalendarDay> = log
        .range(first_day, last_day)
        .filter(|(_, record)| has_workout(Some(record)))
        .map(|(date, record)| CalendarDay {
            date: *date,
            status: record.status,
            exercises: record.exercises.len(),
            tonnage: tonnage_of(&record.exercises).total,
        })
        .collect();

    emit(fmt, &days, || {
        // Print calendar header
        let month_name = first_day.format("%B %Y").to_string();
        println!("\n{}", month_name.bold().cyan());
        println!("{}", "Su Mo Tu We Th Fr Sa".dimmed());

        // Get the day of week for the first day (0 = Sunday)
        let first_weekday = first_day.weekday().num_days_from_sunday() as usize;

        // Print leading spaces
        print!("{}", "   ".repeat(first_weekday));

        for day in 1..=last_day.day() {
            let day_num = day as usize;
            let trained = days.iter().find(|d| d.date.day() == day);

            match trained.map(|d| d.status) {
                Some(Some(DayStatus::Planned)) => print!("{:>2} ", day.to_string().yellow()),
                Some(_) => print!("{:>2} ", day.to_string().green().bold()),
                None => print!("{:2} ", day),
            }

            // New line at end of week
            if (first_weekday + day_num) % 7 == 0 {
                println!();
            }
        }
        println!("\n");

        if !days.is_empty() {
            println!("{}", "Workouts:".bold().cyan());
            for d in &days {
                println!(
                    "  {} | {} exercises | {} kg",
                    d.date.format("%a %b %d").to_string().green(),
                    d.exercises,
                    format_thousands(d.tonnage)
                );
            }
            println!();
        }

        println!("{}", "Month:".bold().cyan());
        print_aggregate(&aggregate_window(&log, Window::Monthly, first_day));
    })
}
