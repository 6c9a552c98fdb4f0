//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the indicator table and picks a data source
//! - scores and aggregates the dashboard
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PlotArgs, RunArgs, TableArgs};
use crate::domain::DashboardConfig;
use crate::error::AppError;
use crate::indicators::IndicatorTable;

pub mod pipeline;

/// Entry point for the `pulse` binary.
pub fn run() -> Result<(), AppError> {
    // `pulse` and `pulse --offline` behave like `pulse show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // The TUI owns the terminal; log lines would tear through it.
    if !matches!(cli.command, Command::Tui(_)) {
        crate::logging::init_logging(cli.log_format);
    }

    match cli.command {
        Command::Show(args) => handle_run(args, OutputMode::Full),
        Command::Signals(args) => handle_run(args, OutputMode::SignalsOnly),
        Command::Plot(args) => handle_plot(args),
        Command::Indicators(args) => handle_indicators(args),
        Command::Tui(args) => handle_tui(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SignalsOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args);
    let mut service = pipeline::DashboardService::from_config(&config)?;
    let source_name = service.source_name().to_string();
    let dashboard = service.current();

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_summary(dashboard, &source_name));
        println!("{}", crate::report::format_dimensions(&dashboard.dimensions));
        println!("{}", crate::report::format_observations(&dashboard.observations));

        if config.plot {
            let plot = crate::plot::render_ascii_radar(&dashboard.dimensions, config.plot_width, config.plot_height);
            println!("{plot}");
        }
    }

    println!("{}", crate::report::format_signals(dashboard));

    if let Some(path) = &config.export_csv {
        crate::io::export::write_observations_csv(path, &dashboard.observations)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::snapshot::write_dashboard_json(path, dashboard)?;
    }

    Ok(())
}

fn handle_tui(args: RunArgs) -> Result<(), AppError> {
    crate::tui::run(&dashboard_config_from_args(&args))
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let dashboard = crate::io::snapshot::read_dashboard_json(&args.dashboard)?;
    let plot = crate::plot::render_ascii_radar(&dashboard.dimensions, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_indicators(args: TableArgs) -> Result<(), AppError> {
    let table = IndicatorTable::load_or_builtin(args.indicators.as_deref())?;
    if args.json {
        println!("{}", table.to_json_pretty()?);
    } else {
        print!("{}", crate::report::format_indicator_table(table.indicators()));
    }
    Ok(())
}

pub fn dashboard_config_from_args(args: &RunArgs) -> DashboardConfig {
    DashboardConfig {
        indicators: args.indicators.clone(),
        offline: args.offline,
        parallel: args.parallel,
        cache_ttl_secs: args.cache_ttl,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.csv.clone(),
        export_json: args.json.clone(),
    }
}

/// Rewrite argv so `pulse` defaults to `pulse show`.
///
/// Rules:
/// - `pulse`                      -> `pulse show`
/// - `pulse --offline ...`        -> `pulse show --offline ...`
/// - `pulse --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "signals" | "plot" | "indicators" | "tui");
    if is_subcommand {
        return argv;
    }

    // `--log-format` is global and may precede the subcommand.
    if arg1 == "--log-format" {
        let has_subcommand = argv.get(3).is_some_and(|a| !a.starts_with('-'));
        if !has_subcommand {
            argv.insert(3.min(argv.len()), "show".to_string());
        }
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_shows_dashboard() {
        assert_eq!(rewrite_args(argv(&["pulse"])), argv(&["pulse", "show"]));
    }

    #[test]
    fn leading_flag_is_routed_to_show() {
        assert_eq!(
            rewrite_args(argv(&["pulse", "--offline", "--no-plot"])),
            argv(&["pulse", "show", "--offline", "--no-plot"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["pulse", "tui", "--offline"]),
            argv(&["pulse", "indicators", "--json"]),
            argv(&["pulse", "--help"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn global_log_format_keeps_its_value() {
        assert_eq!(
            rewrite_args(argv(&["pulse", "--log-format", "json"])),
            argv(&["pulse", "--log-format", "json", "show"])
        );
        assert_eq!(
            rewrite_args(argv(&["pulse", "--log-format", "json", "signals"])),
            argv(&["pulse", "--log-format", "json", "signals"])
        );
    }

    #[test]
    fn config_mirrors_flags() {
        let cli = crate::cli::Cli::try_parse_from(["pulse", "show", "--no-plot", "--parallel", "--json", "d.json"])
            .unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        let config = dashboard_config_from_args(&args);
        assert!(!config.plot);
        assert!(config.parallel);
        assert!(!config.offline);
        assert_eq!(config.export_json.as_deref(), Some(std::path::Path::new("d.json")));
        assert_eq!(config.cache_ttl_secs, crate::cache::DEFAULT_TTL_SECS);
    }
}
