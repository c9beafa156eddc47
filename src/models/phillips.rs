//! Phillips-curve projections.
//!
//! Three fixed linear relationships between inflation, the unemployment gap
//! `u - u*` and inflation expectations. The coefficients come from an
//! external econometric estimate and are reproduced exactly:
//!
//! ```text
//! pure     = 6.460  - 0.124  * E                - 0.339   * (u - u*)
//! adaptive = 0.045  + 0.99   * π                + 0.00323 * (u - u*)
//! hybrid   = 0.0543 - 0.0017 * E + 0.99 * π     + 0.0025  * (u - u*)
//! ```

use crate::domain::{DerivedKind, Series};
use crate::error::AppError;
use crate::math::join;

/// One of the projection variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhillipsVariant {
    Pure,
    Adaptive,
    Hybrid,
}

impl PhillipsVariant {
    pub const ALL: [PhillipsVariant; 3] = [
        PhillipsVariant::Pure,
        PhillipsVariant::Adaptive,
        PhillipsVariant::Hybrid,
    ];

    pub fn kind(self) -> DerivedKind {
        match self {
            PhillipsVariant::Pure => DerivedKind::Pure,
            PhillipsVariant::Adaptive => DerivedKind::Adaptive,
            PhillipsVariant::Hybrid => DerivedKind::Hybrid,
        }
    }
}

pub fn pure(expectation: f64, unemployment: f64, natural_rate: f64) -> f64 {
    6.460 - 0.124 * expectation - 0.339 * (unemployment - natural_rate)
}

pub fn adaptive(effective_inflation: f64, unemployment: f64, natural_rate: f64) -> f64 {
    0.045 + 0.99 * effective_inflation + 0.00323 * (unemployment - natural_rate)
}

pub fn hybrid(expectation: f64, effective_inflation: f64, unemployment: f64, natural_rate: f64) -> f64 {
    0.0543 - 0.0017 * expectation + 0.99 * effective_inflation + 0.0025 * (unemployment - natural_rate)
}

/// Project a whole series for `variant`.
///
/// Only the inputs the variant uses are joined, so e.g. the pure curve does
/// not require effective inflation to cover the same dates.
pub fn project_series(
    variant: PhillipsVariant,
    expectations: &Series,
    effective: &Series,
    unemployment: &Series,
    natural_rate: f64,
) -> Result<Series, AppError> {
    let points: Vec<_> = match variant {
        PhillipsVariant::Pure => join([expectations, unemployment])?
            .into_iter()
            .map(|(date, [e, u])| (date, pure(e, u, natural_rate)))
            .collect(),
        PhillipsVariant::Adaptive => join([effective, unemployment])?
            .into_iter()
            .map(|(date, [pi, u])| (date, adaptive(pi, u, natural_rate)))
            .collect(),
        PhillipsVariant::Hybrid => join([expectations, effective, unemployment])?
            .into_iter()
            .map(|(date, [e, pi, u])| (date, hybrid(e, pi, u, natural_rate)))
            .collect(),
    };
    Ok(Series::new(variant.kind().display_name(), points))
}

#[cfg(test)]
mod tests {
    use chrono::{Months, NaiveDate};

    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn pure_matches_reference_point() {
        assert!((pure(5.0, 8.0, 8.0) - 5.84).abs() < TOL);
    }

    #[test]
    fn adaptive_matches_reference_point() {
        assert!((adaptive(4.0, 8.0, 8.0) - 4.005).abs() < TOL);
    }

    #[test]
    fn hybrid_matches_reference_point() {
        assert!((hybrid(5.0, 4.0, 8.0, 8.0) - 4.0058).abs() < TOL);
    }

    #[test]
    fn unemployment_gap_enters_with_fixed_slopes() {
        assert!((pure(0.0, 9.0, 8.0) - (6.460 - 0.339)).abs() < TOL);
        assert!((adaptive(0.0, 9.0, 8.0) - (0.045 + 0.00323)).abs() < TOL);
        assert!((hybrid(0.0, 0.0, 9.0, 8.0) - (0.0543 + 0.0025)).abs() < TOL);
    }

    fn series(name: &str, start: NaiveDate, values: &[f64]) -> Series {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + Months::new(i as u32), v))
            .collect();
        Series::new(name, points)
    }

    #[test]
    fn series_projection_uses_date_join() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let expectations = series("expectations", start, &[5.0, 5.0, 5.0]);
        let effective = series("effective", start, &[4.0, 4.0, 4.0]);
        let mut unemployment = series("unemployment", start, &[8.0, 9.0, 10.0]);
        unemployment.points.reverse();

        let out = project_series(PhillipsVariant::Pure, &expectations, &effective, &unemployment, 8.0).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out.points[0].1 - 5.84).abs() < TOL);
        assert!((out.points[1].1 - (5.84 - 0.339)).abs() < TOL);
        assert_eq!(out.points[2].0, start + Months::new(2));
    }

    #[test]
    fn series_projection_rejects_misaligned_inputs() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let expectations = series("expectations", start, &[5.0, 5.0, 5.0]);
        let effective = series("effective", start + Months::new(1), &[4.0, 4.0, 4.0]);
        let unemployment = series("unemployment", start, &[8.0, 8.0, 8.0]);

        let err = project_series(PhillipsVariant::Hybrid, &expectations, &effective, &unemployment, 8.0)
            .unwrap_err();
        assert!(matches!(err, AppError::Misalignment { .. }));
    }
}
