//! Explicit date joins across series.
//!
//! Derived series are never computed positionally: every input is first
//! joined on date, and the join refuses inputs whose dates differ.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::Series;
use crate::error::AppError;

/// Join `N` series on date into rows of `[value; N]`, ascending by date.
///
/// All inputs must cover exactly the same set of dates. The first date found
/// in one input but not another is reported as a `Misalignment`.
pub fn join<const N: usize>(inputs: [&Series; N]) -> Result<Vec<(NaiveDate, [f64; N])>, AppError> {
    let Some(first) = inputs.first() else {
        return Ok(Vec::new());
    };

    let maps = inputs
        .iter()
        .map(|s| index_by_date(s))
        .collect::<Result<Vec<_>, _>>()?;
    let reference = &maps[0];

    for (series, map) in inputs.iter().zip(&maps).skip(1) {
        if let Some(date) = first_mismatch(reference, map) {
            return Err(AppError::Misalignment {
                left: first.name.clone(),
                right: series.name.clone(),
                date,
            });
        }
    }

    let mut rows = Vec::with_capacity(reference.len());
    for &date in reference.keys() {
        let mut row = [0.0; N];
        for ((slot, map), series) in row.iter_mut().zip(&maps).zip(inputs.iter()) {
            *slot = *map.get(&date).ok_or_else(|| AppError::Misalignment {
                left: first.name.clone(),
                right: series.name.clone(),
                date,
            })?;
        }
        rows.push((date, row));
    }
    Ok(rows)
}

fn index_by_date(series: &Series) -> Result<BTreeMap<NaiveDate, f64>, AppError> {
    let mut map = BTreeMap::new();
    for &(date, value) in &series.points {
        if map.insert(date, value).is_some() {
            return Err(AppError::Misalignment {
                left: series.name.clone(),
                right: series.name.clone(),
                date,
            });
        }
    }
    Ok(map)
}

fn first_mismatch(a: &BTreeMap<NaiveDate, f64>, b: &BTreeMap<NaiveDate, f64>) -> Option<NaiveDate> {
    a.keys()
        .filter(|d| !b.contains_key(d))
        .chain(b.keys().filter(|d| !a.contains_key(d)))
        .min()
        .copied()
}
