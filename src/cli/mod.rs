//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline. Every default reproduces the fixed analysis; none of the
//! regression coefficients are exposed.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::domain::{AnalysisConfig, Window};
use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "phillips", version, about = "Phillips-curve inflation projections from Ipeadata series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, compute, and display the overlay and stacked charts in the terminal.
    Show(AnalysisArgs),
    /// Print the natural rate, per-series summary and (optionally) the monthly table.
    Report(ReportArgs),
    /// Write the derived series to CSV and both charts to SVG.
    Export(ExportArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct AnalysisArgs {
    /// First month of the analysis window (YYYY-MM-DD, first of month).
    #[arg(long, default_value = "2012-11-01")]
    pub start: NaiveDate,

    /// Last month of the analysis window (YYYY-MM-DD, first of month).
    #[arg(long, default_value = "2023-12-01")]
    pub end: NaiveDate,

    /// Timeout for each request to the data source, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Also print one row per month.
    #[arg(long)]
    pub table: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Output directory (created if missing).
    #[arg(long, value_name = "DIR", default_value = "out")]
    pub out: PathBuf,
}

impl AnalysisArgs {
    pub fn to_config(&self) -> Result<AnalysisConfig, AppError> {
        for (flag, date) in [("--start", self.start), ("--end", self.end)] {
            if date.day() != 1 {
                return Err(AppError::Config(format!(
                    "{flag} must be the first day of a month, got {date}"
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("--timeout-secs must be > 0".to_string()));
        }
        Ok(AnalysisConfig {
            window: Window::new(self.start, self.end)?,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}
