//! Export the derived series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per month, one column per derived series, values in percent.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::app::pipeline::AnalysisOutput;
use crate::error::AppError;
use crate::math::join;

#[derive(Debug, Serialize)]
struct InflationRow {
    date: NaiveDate,
    effective: f64,
    pure: f64,
    adaptive: f64,
    hybrid: f64,
    unemployment: f64,
    expectation: f64,
}

/// Write one row per date with all derived series and their inputs.
pub fn write_inflation_csv(path: &Path, output: &AnalysisOutput) -> Result<(), AppError> {
    let rows = join([
        &output.effective,
        &output.pure,
        &output.adaptive,
        &output.hybrid,
        &output.inputs.unemployment,
        &output.inputs.expectations,
    ])?;

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("failed to create '{}': {e}", path.display())))?;

    for (date, [effective, pure, adaptive, hybrid, unemployment, expectation]) in rows {
        writer
            .serialize(InflationRow {
                date,
                effective,
                pure,
                adaptive,
                hybrid,
                unemployment,
                expectation,
            })
            .map_err(|e| AppError::Export(format!("failed to write CSV row for {date}: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::Export(format!("failed to flush '{}': {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::fixtures::mock_output;

    #[test]
    fn writes_one_row_per_month() {
        let output = mock_output();
        let path = std::env::temp_dir().join(format!("phillips_export_{}.csv", std::process::id()));

        write_inflation_csv(&path, &output).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,effective,pure,adaptive,hybrid,unemployment,expectation")
        );
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), output.effective.len());
        assert!(rows[0].starts_with("2021-01-01,"));
        assert!(rows[rows.len() - 1].starts_with("2022-06-01,"));
    }
}
