//! Summary statistics over series values.

use crate::domain::{Series, Window};
use crate::error::AppError;

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Natural rate of unemployment: the mean unemployment rate over `window`.
pub fn natural_rate(unemployment: &Series, window: &Window) -> Result<f64, AppError> {
    let windowed = unemployment.window_non_empty(window)?;
    let values: Vec<f64> = windowed.values().collect();
    mean(&values).ok_or_else(|| AppError::EmptyWindow {
        series: unemployment.name.clone(),
        start: window.start,
        end: window.end,
    })
}

/// Per-series summary used by the text report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub last: f64,
}

pub fn summarize(series: &Series) -> Option<SeriesSummary> {
    let values: Vec<f64> = series.values().collect();
    let (min, max) = series.value_range()?;
    Some(SeriesSummary {
        n: values.len(),
        min,
        max,
        mean: mean(&values)?,
        last: *values.last()?,
    })
}
