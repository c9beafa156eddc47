//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fetch + compute pipeline
//! - hands the results to the chosen presentation (TUI, text, files)

use std::path::Path;

use clap::Parser;

use crate::cli::{AnalysisArgs, Command, ExportArgs, ReportArgs};
use crate::error::AppError;
use crate::plot::PlotData;

pub mod pipeline;

/// Entry point for the `phillips` binary.
pub fn run() -> Result<(), AppError> {
    // `phillips` with no subcommand behaves like `phillips show`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Report(args) => handle_report(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_show(args: AnalysisArgs) -> Result<(), AppError> {
    let config = args.to_config()?;
    let output = pipeline::run_analysis(&config)?;
    crate::tui::run(&output)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = args.analysis.to_config()?;
    let output = pipeline::run_analysis(&config)?;

    let table = if args.table {
        Some(crate::report::format_monthly_table(&output)?)
    } else {
        None
    };

    println!("{}", crate::report::format_run_summary(&output));
    if let Some(table) = table {
        println!("{table}");
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = args.analysis.to_config()?;
    let output = pipeline::run_analysis(&config)?;
    export_all(&args.out, &output)
}

/// Write the CSV and both SVG charts into `dir`.
pub fn export_all(dir: &Path, output: &pipeline::AnalysisOutput) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::Export(format!("failed to create '{}': {e}", dir.display())))?;

    crate::io::write_inflation_csv(&dir.join("inflation.csv"), output)?;

    let data = PlotData::from_output(output);
    crate::plot::svg::write_overlay_svg(&dir.join("overlay.svg"), &data)?;
    crate::plot::svg::write_stacked_svg(&dir.join("stacked.svg"), &data)?;
    Ok(())
}

/// Rewrite argv so `phillips` defaults to `phillips show`.
///
/// Rules:
/// - `phillips`                      -> `phillips show`
/// - `phillips --start 2015-01-01`   -> `phillips show --start 2015-01-01`
/// - `phillips --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
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
    fn bare_invocation_defaults_to_show() {
        assert_eq!(rewrite_args(argv(&["phillips"])), argv(&["phillips", "show"]));
        assert_eq!(
            rewrite_args(argv(&["phillips", "--end", "2020-12-01"])),
            argv(&["phillips", "show", "--end", "2020-12-01"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["phillips", "report"])), argv(&["phillips", "report"]));
        assert_eq!(rewrite_args(argv(&["phillips", "--help"])), argv(&["phillips", "--help"]));
    }

    #[test]
    fn export_all_writes_three_files() {
        let output = pipeline::fixtures::mock_output();
        let dir = std::env::temp_dir().join(format!("phillips_export_all_{}", std::process::id()));

        export_all(&dir, &output).unwrap();
        for name in ["inflation.csv", "overlay.svg", "stacked.svg"] {
            assert!(dir.join(name).is_file(), "{name}");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
