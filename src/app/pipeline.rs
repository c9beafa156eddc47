//! Shared analysis pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> normalize/window -> effective inflation -> natural rate -> projections
//!
//! The subcommands then only differ in presentation (TUI, text, files).

use crate::data::{IpeaClient, SourceData};
use crate::domain::{AnalysisConfig, DerivedKind, Indicator, Series};
use crate::error::AppError;
use crate::math::{effective_inflation, natural_rate};
use crate::models::{PhillipsVariant, project_series};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub config: AnalysisConfig,
    /// Inputs after windowing (price index keeps its extra year of history).
    pub inputs: SourceData,
    pub natural_rate: f64,
    pub effective: Series,
    pub pure: Series,
    pub adaptive: Series,
    pub hybrid: Series,
}

impl AnalysisOutput {
    pub fn series(&self, kind: DerivedKind) -> &Series {
        match kind {
            DerivedKind::Effective => &self.effective,
            DerivedKind::Pure => &self.pure,
            DerivedKind::Adaptive => &self.adaptive,
            DerivedKind::Hybrid => &self.hybrid,
        }
    }

    /// The four derived series in presentation order.
    pub fn derived(&self) -> impl Iterator<Item = (DerivedKind, &Series)> + '_ {
        DerivedKind::ALL.into_iter().map(move |kind| (kind, self.series(kind)))
    }
}

/// Fetch the inputs and run the full pipeline.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    let client = IpeaClient::from_env(config.timeout)?;
    let data = client.fetch_all(config)?;

    run_analysis_with_data(config, data)
}

/// Run the pipeline over already-fetched inputs.
pub fn run_analysis_with_data(config: &AnalysisConfig, data: SourceData) -> Result<AnalysisOutput, AppError> {
    let window = config.window;

    // 1) Normalize: restrict every input to its window.
    let inputs = SourceData {
        price: data
            .price
            .window_non_empty(&config.source_window(Indicator::PriceIndex)?)?,
        unemployment: data
            .unemployment
            .window_non_empty(&config.source_window(Indicator::Unemployment)?)?,
        expectations: data
            .expectations
            .window_non_empty(&config.source_window(Indicator::Expectations)?)?,
    };

    // 2) Effective inflation over the full price history, then windowed.
    let effective = effective_inflation(&inputs.price, &window)?;

    // 3) Natural rate over the analysis window.
    let natural = natural_rate(&inputs.unemployment, &window)?;
    log::info!(
        "natural rate {natural:.4} over {} months ({}..={})",
        inputs.unemployment.len(),
        window.start,
        window.end
    );

    // 4) Projections, each over an explicit date join of its inputs.
    let [pure, adaptive, hybrid] = PhillipsVariant::ALL.map(|variant| {
        let series = project_series(
            variant,
            &inputs.expectations,
            &effective,
            &inputs.unemployment,
            natural,
        )?;
        log::info!("{:?} projection: {} points", variant, series.len());
        Ok::<_, AppError>(series)
    });
    let (pure, adaptive, hybrid) = (pure?, adaptive?, hybrid?);

    Ok(AnalysisOutput {
        config: config.clone(),
        inputs,
        natural_rate: natural,
        effective,
        pure,
        adaptive,
        hybrid,
    })
}

/// Deterministic inputs for tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Months, NaiveDate};

    use super::*;

    fn monthly(name: &str, start: NaiveDate, n: usize, f: impl Fn(usize) -> f64) -> Series {
        let points = (0..n).map(|i| (start + Months::new(i as u32), f(i))).collect();
        Series::new(name, points)
    }

    /// 36 months of data per input, starting Jan 2020.
    pub fn mock_data() -> SourceData {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        SourceData {
            price: monthly("price index", start, 36, |i| 100.0 * (1.0 + 0.005 * i as f64)),
            unemployment: monthly("unemployment", start, 36, |i| 8.0 + (i % 6) as f64 * 0.5),
            expectations: monthly("expectations", start, 36, |i| 4.0 + (i % 3) as f64 * 0.25),
        }
    }

    /// Pipeline output over Jan 2021 ..= Jun 2022 of `mock_data`.
    pub fn mock_output() -> AnalysisOutput {
        let config = AnalysisConfig {
            window: crate::domain::Window::new(
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            )
            .unwrap(),
            ..AnalysisConfig::default()
        };
        run_analysis_with_data(&config, mock_data()).unwrap()
    }
}
