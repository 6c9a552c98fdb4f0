//! Command-line parsing for the market-health dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cache::DEFAULT_TTL_SECS;
use crate::domain::LogFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Composite market-health dashboard")]
pub struct Cli {
    /// Log output format.
    #[arg(long, global = true, value_enum, env = "PULSE_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every indicator, print the dashboard, and optionally plot/export.
    Show(RunArgs),
    /// Print only the supportive / risk signal lists (useful for scripting).
    Signals(RunArgs),
    /// Plot the radar chart of a previously exported dashboard JSON.
    Plot(PlotArgs),
    /// Print the indicator table after validating it.
    Indicators(TableArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `pulse show`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(RunArgs),
}

/// Common options for computing a dashboard.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Indicator table JSON (defaults to the built-in table).
    #[arg(long, value_name = "JSON")]
    pub indicators: Option<PathBuf>,

    /// Do not contact the provider; every indicator uses its fallback.
    #[arg(long)]
    pub offline: bool,

    /// Fetch indicators concurrently.
    #[arg(long)]
    pub parallel: bool,

    /// Seconds a computed dashboard is reused before refetching.
    #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
    pub cache_ttl: u64,

    /// Disable the terminal radar plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 41)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 21)]
    pub height: usize,

    /// Export observations to CSV.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Export the full dashboard to JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

/// Options for plotting a saved dashboard.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Dashboard JSON file produced by `pulse show --json`.
    #[arg(long, value_name = "JSON")]
    pub dashboard: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 41)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 21)]
    pub height: usize,
}

/// Options for inspecting the indicator table.
#[derive(Debug, Parser)]
pub struct TableArgs {
    /// Indicator table JSON (defaults to the built-in table).
    #[arg(long, value_name = "JSON")]
    pub indicators: Option<PathBuf>,

    /// Print the table as JSON (a starting point for a custom table).
    #[arg(long)]
    pub json: bool,
}
