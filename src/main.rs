use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use types::{Config, OutputFmt, config_path};

mod cli;
mod commands;
mod types;

fn init_tracing() {
    let filter = std::env::var("BARLOG_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("log filter: {}", filter);
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let fmt = if cli.json { OutputFmt::Json } else { OutputFmt::Text };
    let config_path = config_path()?;

    // Config edits must work even when the current config is broken.
    if let Commands::Config(cmd) = cli.cmd {
        return commands::config::handle(cmd, &config_path);
    }

    let settings = Config::load(&config_path)?.settings(cli.log)?;
    tracing::debug!(log = %settings.log_path.display(), "resolved settings");

    match cli.cmd {
        Commands::Stats { window, date } => commands::stats::handle(&settings, window, date.as_deref(), fmt)?,
        Commands::Acwr { date } => commands::stats::handle_acwr(&settings, date.as_deref(), fmt)?,
        Commands::Analyze {
            from,
            to,
            exercises,
            daily,
        } => commands::analyze::handle(&settings, &from, &to, exercises, daily, fmt)?,
        Commands::Report { from, to } => commands::report::handle(&settings, &from, &to, fmt)?,
        Commands::Calendar { year, month } => commands::calendar::handle(&settings, year, month, fmt)?,
        Commands::Trend { weeks, graph } => commands::trend::handle(&settings, weeks, graph, fmt)?,
        Commands::Log(cmd) => commands::log::handle(cmd, &settings, fmt)?,
        Commands::Max(cmd) => commands::maximums::handle(cmd, &settings, fmt)?,
        Commands::Config(_) => unreachable!("handled before settings are resolved"),
    }

    Ok(())
}
