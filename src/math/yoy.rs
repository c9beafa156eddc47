//! Year-over-year percentage change ("effective inflation").
//!
//! For a monthly price index `p`:
//!
//! ```text
//! π[t] = (p[t] / p[t - 12 months] - 1) * 100
//! ```
//!
//! The base is looked up by calendar month, not by position. A month with no
//! observation, or whose year-ago month has none, is `None`, never zero.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::domain::{DerivedKind, Series, Window};
use crate::error::AppError;

/// Months between an observation and its year-ago counterpart.
pub const YOY_LAG: u32 = 12;

/// Percentage change of each month versus the month `lag` months earlier.
///
/// The output covers every calendar month from the first to the last
/// observation, so a gap in the input shows up as `None` at the gap itself
/// and at the gap plus `lag`. A zero or non-finite base also yields `None`.
pub fn lagged_pct_change(series: &Series, lag: u32, name: &str) -> Series<Option<f64>> {
    let by_date: BTreeMap<NaiveDate, f64> = series.points.iter().copied().collect();
    let (Some(&first), Some(&last)) = (by_date.keys().next(), by_date.keys().next_back()) else {
        return Series::new(name, Vec::new());
    };

    let mut points = Vec::with_capacity(by_date.len());
    let mut date = first;
    while date <= last {
        let change = by_date.get(&date).copied().and_then(|value| {
            date.checked_sub_months(Months::new(lag))
                .and_then(|base_date| by_date.get(&base_date).copied())
                .filter(|base| base.is_finite() && *base != 0.0)
                .map(|base| (value / base - 1.0) * 100.0)
                .filter(|v| v.is_finite())
        });
        points.push((date, change));

        match date.checked_add_months(Months::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    Series::new(name, points)
}

/// Effective inflation over `window`.
///
/// The change is computed over the full price history first and only then
/// restricted to the window, so the first window month can still look back a
/// year. Any undefined value left inside the window is an error.
pub fn effective_inflation(price: &Series, window: &Window) -> Result<Series, AppError> {
    let full = lagged_pct_change(price, YOY_LAG, DerivedKind::Effective.display_name());
    log::debug!(
        "effective inflation: {} raw points, {} undefined",
        full.len(),
        full.points.iter().filter(|(_, v)| v.is_none()).count()
    );
    full.window_non_empty(window)?.into_defined()
}
