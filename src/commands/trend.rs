use anyhow::Result;
use barlog::{
    acwr::acwr_report,
    utils::format_thousands,
    window::{WEEK_DAYS, aggregate, trailing_start},
};
use chrono::{Days, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use crate::{
    commands::{load_log, stats::zone_label},
    types::{OutputFmt, Settings, emit},
};

#[derive(Serialize)]
struct WeekPoint {
    week_end: NaiveDate,
    tonnage: f64,
    reps: u64,
    sets: u64,
    avg_intensity: f64,
    acwr: f64,
}

fn create_ascii_graph(data: &[(NaiveDate, f64)], width: usize, height: usize, title: &str) -> Vec<String> {
    if data.len() < 2 || width < 2 || height < 2 {
        return vec!["Not enough data to graph".to_string()];
    }

    let min_value = data.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max_value = data.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let range = max_value - min_value;

    if range == 0.0 {
        return vec!["No variation in data".to_string()];
    }

    let mut grid = vec![vec![' '; width]; height];
    let to_x = |i: usize| (i as f64 / (data.len() - 1) as f64 * (width - 1) as f64) as usize;
    let to_y = |v: f64| height - 1 - ((v - min_value) / range * (height - 1) as f64) as usize;

    for (i, (_, value)) in data.iter().enumerate() {
        let (x, y) = (to_x(i), to_y(*value));
        grid[y][x] = '●';

        // Draw connecting lines
        if i > 0 {
            let (prev_x, prev_y) = (to_x(i - 1), to_y(data[i - 1].1));
            let dx = x as isize - prev_x as isize;
            let dy = y as isize - prev_y as isize;
            let steps = dx.abs().max(dy.abs());

            for step in 1..steps {
                let px = (prev_x as isize + dx * step / steps) as usize;
                let py = (prev_y as isize + dy * step / steps) as usize;
                if grid[py][px] == ' ' {
                    grid[py][px] = '·';
                }
            }
        }
    }

    let mut result = Vec::new();
    let step = range / (height - 1) as f64;

    result.push(format!("\n{}", title.bold()));
    result.push("─".repeat(width + 9));

    for (i, row) in grid.iter().enumerate() {
        let value = min_value + step * (height - 1 - i) as f64;
        let label = if range < 10.0 {
            format!("{value:.2}")
        } else {
            format_thousands(value)
        };
        result.push(format!("{:>7} │{}", label, row.iter().collect::<String>()));
    }

    result.push(format!("        └{}", "─".repeat(width)));
    if let (Some(first), Some(last)) = (data.first(), data.last()) {
        result.push(format!("        {}  {}", first.0, last.0));
    }

    result
}

/// Change from the first half of the period to the second, in percent.
fn half_over_half(values: &[f64]) -> Option<f64> {
    let mid = values.len() / 2;
    if mid == 0 {
        return None;
    }
    let early: f64 = values[..mid].iter().sum::<f64>() / mid as f64;
    let late: f64 = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;
    (early > 0.0).then(|| (late - early) / early * 100.0)
}

pub fn handle(settings: &Settings, weeks: u32, graph: bool, fmt: OutputFmt) -> Result<()> {
    let log = load_log(settings)?;
    let today = chrono::Local::now().date_naive();

    let points: Vec<WeekPoint> = (0..weeks as u64)
        .rev()
        .filter_map(|w| today.checked_sub_days(Days::new(w * WEEK_DAYS)))
        .map(|week_end| {
            let agg = aggregate(&log, trailing_start(week_end, WEEK_DAYS), week_end);
            WeekPoint {
                week_end,
                tonnage: agg.tonnage,
                reps: agg.reps,
                sets: agg.sets,
                avg_intensity: agg.avg_intensity,
                acwr: acwr_report(&log, week_end).ratio,
            }
        })
        .collect();

    emit(fmt, &points, || {
        let Some(first) = points.first() else {
            println!("{}", "(no weeks requested)".dimmed());
            return;
        };
        let period_start = trailing_start(first.week_end, WEEK_DAYS);
        let period = aggregate(&log, period_start, today);

        println!(
            "{} last {} weeks ({} → {})",
            "Training status:".cyan().bold(),
            weeks,
            period_start,
            today
        );
        println!(
            "  {} kg over {} sets, {} trained days",
            format_thousands(period.tonnage).bold(),
            period.sets,
            period.days_with_workouts
        );

        let tonnages: Vec<f64> = points.iter().map(|p| p.tonnage).collect();
        if let Some(change) = half_over_half(&tonnages) {
            let arrow = if change >= 0.0 { "▲".green() } else { "▼".red() };
            println!("  {} Weekly tonnage: {:+.1}%", arrow, change);
        }

        let current = acwr_report(&log, today);
        match current.zone {
            Some(zone) => println!("  ACWR {:.2} ({})", current.ratio, zone_label(zone)),
            None => println!("  ACWR {}", "– (not enough data)".dimmed()),
        }

        if graph {
            let (term_width, term_height) = term_size::dimensions().unwrap_or((80, 24));
            let width = (term_width / 2).min(60);
            let height = (term_height / 2).min(15);

            let tonnage_data: Vec<(NaiveDate, f64)> =
                points.iter().map(|p| (p.week_end, p.tonnage)).collect();
            for line in create_ascii_graph(&tonnage_data, width, height, "Weekly tonnage (kg)") {
                println!("{}", line);
            }

            let acwr_data: Vec<(NaiveDate, f64)> = points.iter().map(|p| (p.week_end, p.acwr)).collect();
            for line in create_ascii_graph(&acwr_data, width, height, "ACWR") {
                println!("{}", line);
            }
        } else {
            println!();
            for p in &points {
                println!(
                    "  {} {:>9} kg  {:>5} reps  {:>5} kg avg  {}",
                    p.week_end.to_string().dimmed(),
                    format_thousands(p.tonnage),
                    p.reps,
                    format_thousands(p.avg_intensity),
                    format!("acwr {:.2}", p.acwr).dimmed()
                );
            }
        }
    })
}
