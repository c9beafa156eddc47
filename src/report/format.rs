//! Text summary of a run.
//!
//! We keep formatting code in one place so the math stays clean and testable
//! and output changes are localized.

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{DerivedKind, Indicator};
use crate::error::AppError;
use crate::math::{join, summarize};

/// Header block: window, inputs and the natural rate.
pub fn format_run_summary(output: &AnalysisOutput) -> String {
    let window = output.config.window;
    let mut out = String::new();

    out.push_str("=== phillips - Phillips-curve projections (Ipeadata) ===\n");
    out.push_str(&format!("Window: {} ..= {}\n", window.start, window.end));
    out.push_str(&format!("Natural rate of unemployment: {:.4}%\n", output.natural_rate));

    out.push_str("\nInputs:\n");
    for indicator in Indicator::ALL {
        let series = output.inputs.get(indicator);
        let span = match (series.points.first(), series.points.last()) {
            (Some(first), Some(last)) => format!("{} ..= {}", first.0, last.0),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "  {:<18} {:<14} n={:<4} {span}\n",
            indicator.series_id(),
            indicator.label(),
            series.len()
        ));
    }

    out.push_str("\nDerived series (%):\n");
    out.push_str(&format!(
        "  {:<24} {:>5} {:>8} {:>8} {:>8} {:>8}\n",
        "series", "n", "min", "max", "mean", "last"
    ));
    for (kind, series) in output.derived() {
        match summarize(series) {
            Some(s) => out.push_str(&format!(
                "  {:<24} {:>5} {:>8.3} {:>8.3} {:>8.3} {:>8.3}\n",
                kind.display_name(),
                s.n,
                s.min,
                s.max,
                s.mean,
                s.last
            )),
            None => out.push_str(&format!("  {:<24} (empty)\n", kind.display_name())),
        }
    }

    out
}

/// Monthly table of the four derived series.
///
/// Fails if the series do not share the same dates.
pub fn format_monthly_table(output: &AnalysisOutput) -> Result<String, AppError> {
    let rows = join([&output.effective, &output.pure, &output.adaptive, &output.hybrid])?;

    let mut out = String::new();
    out.push_str(&format!("{:<10}", "date"));
    for kind in DerivedKind::ALL {
        out.push_str(&format!(" {:>10}", kind.column()));
    }
    out.push('\n');

    for (date, values) in rows {
        out.push_str(&date.format("%Y-%m").to_string());
        out.push_str("   ");
        for v in values {
            out.push_str(&format!(" {v:>10.3}"));
        }
        out.push('\n');
    }

    Ok(out)
}
