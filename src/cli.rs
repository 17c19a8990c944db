use std::path::PathBuf;

use barlog::{
    models::{DayStatus, OneRMFormula},
    window::Window,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "barlog", version, about = "Weightlifting training log")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Workout log file (overrides the `log` config key)
    #[arg(global = true, long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sets, reps, tonnage and intensity for a window ending on a date
    #[command(visible_alias = "st")]
    Stats {
        /// daily, weekly (last 7 days), monthly (calendar month) or chronic (last 28 days)
        #[arg(value_enum, default_value_t = Window::Weekly)]
        window: Window,

        /// Reference date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Acute:chronic workload ratio
    Acwr {
        /// Reference date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Per-exercise breakdown over a date range
    #[command(visible_alias = "an")]
    Analyze {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Only include these exercises (repeatable, defaults to all)
        #[arg(short, long = "exercise", value_name = "NAME")]
        exercises: Vec<String>,

        /// Also list every logged day in the range
        #[arg(long)]
        daily: bool,
    },

    /// Day-by-day training report for a date range
    #[command(visible_alias = "r")]
    Report {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Show trained days in a calendar view
    #[command(visible_alias = "cal")]
    Calendar {
        /// Year to show (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show (1-12, defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Weekly tonnage trend and workload ratio history
    Trend {
        /// Time period in weeks (defaults to 12)
        #[arg(short, long, default_value = "12")]
        weeks: u32,

        /// Show graph instead of summary
        #[arg(short, long)]
        graph: bool,
    },

    /// Add to and inspect the workout log
    #[command(subcommand, visible_alias = "l")]
    Log(LogCmd),

    /// Rep-max table
    #[command(subcommand, visible_alias = "m")]
    Max(MaxCmd),

    /// View or edit barlog config
    #[command(subcommand)]
    Config(ConfigCmd),
}

//
// Commands
//

#[derive(Subcommand)]
pub enum LogCmd {
    /// Show one day's exercises
    #[command(visible_alias = "s")]
    Show {
        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Log an exercise - Usage: log add EXERCISE SET...
    #[command(visible_alias = "a")]
    #[command(override_usage = "log add <EXERCISE> <WEIGHTxREPS>... [--parts A,B]")]
    Add {
        /// Exercise name
        exercise: String,

        /// Sets as WEIGHTxREPS, or WEIGHTxREPS+REPS for complexes (e.g. 80x3+2)
        #[arg(required = true, value_name = "SET")]
        sets: Vec<String>,

        /// Movements of a complex, in order (e.g. --parts Clean,Jerk)
        #[arg(short, long, value_delimiter = ',')]
        parts: Vec<String>,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Remove an exercise from a day - Usage: log remove EX_IDX
    #[command(visible_alias = "rm")]
    Remove {
        /// 1-based index of the exercise (same order shown in `log show`)
        #[arg(value_name = "EX_IDX")]
        exercise: usize,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Record the day's macros in grams
    Macros {
        protein: f64,
        carbs: f64,
        fat: f64,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a day as planned or completed
    Status {
        #[arg(value_enum)]
        status: DayStatus,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MaxCmd {
    /// Show the rep-max table
    #[command(visible_alias = "s")]
    Show {
        /// Only this exercise
        exercise: Option<String>,
    },

    /// Set one cell - Usage: max set EXERCISE REPS WEIGHT (weight 0 clears)
    Set {
        exercise: String,
        reps: u32,
        weight: f64,
    },

    /// Raise table cells from the heaviest logged sets
    Sync,

    /// Estimate a one-rep max from the table
    #[command(visible_alias = "e")]
    Estimate {
        exercise: String,

        /// Formula (defaults to the `formula` config key, then epley)
        #[arg(short, long, value_enum)]
        formula: Option<OneRMFormula>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
