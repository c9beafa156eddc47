//! Shared domain types.
//!
//! All series are ordered `(date, value)` sequences keyed by the first day of
//! the reporting month. Values are kept in the source units (index points or
//! percent) throughout.

use std::time::Duration;

use chrono::{Months, NaiveDate};

use crate::error::AppError;

/// A source indicator fetched from the statistical API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Consumer price index (number index).
    PriceIndex,
    /// Unemployment rate, percent of the labour force.
    Unemployment,
    /// Twelve-month-ahead inflation expectations, percent per year.
    Expectations,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [
        Indicator::PriceIndex,
        Indicator::Unemployment,
        Indicator::Expectations,
    ];

    /// Identifier of the series in the source API.
    pub fn series_id(self) -> &'static str {
        match self {
            Indicator::PriceIndex => "PRECOS12_IPCA12",
            Indicator::Unemployment => "PNADC12_TDESOC12",
            Indicator::Expectations => "BM12_IPCAEXP1212",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::PriceIndex => "price index",
            Indicator::Unemployment => "unemployment",
            Indicator::Expectations => "expectations",
        }
    }
}

/// Derived inflation series produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedKind {
    /// Year-over-year change of the price index.
    Effective,
    /// Phillips curve driven by expectations only.
    Pure,
    /// Phillips curve with adaptive (lagged) expectations.
    Adaptive,
    /// Phillips curve mixing expectations and lagged inflation.
    Hybrid,
}

impl DerivedKind {
    pub const ALL: [DerivedKind; 4] = [
        DerivedKind::Effective,
        DerivedKind::Pure,
        DerivedKind::Adaptive,
        DerivedKind::Hybrid,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            DerivedKind::Effective => "Effective inflation",
            DerivedKind::Pure => "Pure Phillips curve",
            DerivedKind::Adaptive => "Adaptive expectations",
            DerivedKind::Hybrid => "Hybrid Phillips curve",
        }
    }

    /// Short column name for tables and CSV headers.
    pub fn column(self) -> &'static str {
        match self {
            DerivedKind::Effective => "effective",
            DerivedKind::Pure => "pure",
            DerivedKind::Adaptive => "adaptive",
            DerivedKind::Hybrid => "hybrid",
        }
    }
}

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::Config(format!(
                "window start {start} is after window end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The same window with its start moved `months` earlier.
    pub fn with_lookback(&self, months: u32) -> Result<Self, AppError> {
        let start = self
            .start
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| AppError::Config(format!("cannot look back {months} months from {}", self.start)))?;
        Ok(Self { start, end: self.end })
    }
}

/// A named, date-ordered sequence of values.
///
/// `V` is `f64` for observed and projected data and `Option<f64>` where a
/// position may be undefined (e.g. before enough history exists).
#[derive(Debug, Clone, PartialEq)]
pub struct Series<V = f64> {
    pub name: String,
    pub points: Vec<(NaiveDate, V)>,
}

impl<V: Clone> Series<V> {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, V)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Keep only the points inside `window`, preserving order.
    pub fn window(&self, window: &Window) -> Self {
        let points = self
            .points
            .iter()
            .filter(|(d, _)| window.contains(*d))
            .cloned()
            .collect();
        Self {
            name: self.name.clone(),
            points,
        }
    }

    /// Window the series and fail if nothing is left.
    pub fn window_non_empty(&self, window: &Window) -> Result<Self, AppError> {
        let out = self.window(window);
        if out.is_empty() {
            return Err(AppError::EmptyWindow {
                series: self.name.clone(),
                start: window.start,
                end: window.end,
            });
        }
        Ok(out)
    }
}

impl Series<f64> {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    /// Minimum and maximum value, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl Series<Option<f64>> {
    /// Convert to a fully defined series, failing at the first undefined date.
    pub fn into_defined(self) -> Result<Series<f64>, AppError> {
        let mut points = Vec::with_capacity(self.points.len());
        for (date, value) in self.points {
            match value {
                Some(v) => points.push((date, v)),
                None => {
                    return Err(AppError::MissingHistory {
                        series: self.name,
                        date,
                    });
                }
            }
        }
        Ok(Series {
            name: self.name,
            points,
        })
    }
}

/// Parameters of a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Shared analysis window for every derived series.
    pub window: Window,
    /// Per-request timeout for acquisition.
    pub timeout: Duration,
}

impl AnalysisConfig {
    /// Months of extra price-index history the year-over-year change needs.
    pub const PRICE_LOOKBACK_MONTHS: u32 = 12;

    /// Minimum-year filter (`year > n`) for fetching `indicator`.
    pub fn min_year(&self, indicator: Indicator) -> Result<i32, AppError> {
        use chrono::Datelike;

        let first = match indicator {
            Indicator::PriceIndex => self.window.with_lookback(Self::PRICE_LOOKBACK_MONTHS)?.start,
            Indicator::Unemployment | Indicator::Expectations => self.window.start,
        };
        Ok(first.year() - 1)
    }

    /// Normalization window for `indicator`.
    pub fn source_window(&self, indicator: Indicator) -> Result<Window, AppError> {
        match indicator {
            Indicator::PriceIndex => self.window.with_lookback(Self::PRICE_LOOKBACK_MONTHS),
            Indicator::Unemployment | Indicator::Expectations => Ok(self.window),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: Window {
                start: NaiveDate::from_ymd_opt(2012, 11, 1).unwrap_or_default(),
                end: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap_or_default(),
            },
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn monthly(n: usize) -> Series {
        let points = (0..n)
            .map(|i| (d(2020, 1) + Months::new(i as u32), i as f64))
            .collect();
        Series::new("test", points)
    }

    #[test]
    fn window_is_inclusive_and_order_preserving() {
        let s = monthly(24);
        let w = Window::new(d(2020, 3), d(2020, 6)).unwrap();
        let out = s.window(&w);
        let dates: Vec<_> = out.dates().collect();
        assert_eq!(dates, vec![d(2020, 3), d(2020, 4), d(2020, 5), d(2020, 6)]);
        assert_eq!(out.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn window_is_idempotent() {
        let s = monthly(36);
        let w = Window::new(d(2020, 7), d(2021, 11)).unwrap();
        let once = s.window(&w);
        let twice = once.window(&w);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_window_fails_explicitly() {
        let s = monthly(6);
        let w = Window::new(d(2030, 1), d(2030, 12)).unwrap();
        let err = s.window_non_empty(&w).unwrap_err();
        assert!(matches!(err, AppError::EmptyWindow { .. }));
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(Window::new(d(2021, 1), d(2020, 1)).is_err());
    }

    #[test]
    fn undefined_points_fail_conversion() {
        let s = Series::new("effective", vec![(d(2020, 1), Some(1.0)), (d(2020, 2), None)]);
        match s.into_defined() {
            Err(AppError::MissingHistory { date, .. }) => assert_eq!(date, d(2020, 2)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn default_config_reproduces_fixed_fetch_thresholds() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_year(Indicator::PriceIndex).unwrap(), 2010);
        assert_eq!(config.min_year(Indicator::Unemployment).unwrap(), 2011);
        assert_eq!(config.min_year(Indicator::Expectations).unwrap(), 2011);
        assert_eq!(
            config.source_window(Indicator::PriceIndex).unwrap().start,
            d(2011, 11)
        );
    }
}
