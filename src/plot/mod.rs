//! Chart definitions shared by the terminal view and SVG export.
//!
//! Two charts are drawn from the four derived series:
//!
//! - overlay: all series on one set of axes with a legend
//! - stacked: one row per series, each titled by its variant
//!
//! The drawing functions are generic over the Plotters backend, so the same
//! chart lands in a Ratatui buffer or an SVG file.

use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::app::pipeline::AnalysisOutput;
use crate::domain::DerivedKind;

pub mod svg;

/// One derived series in chart coordinates (x = fractional year, y = %).
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub kind: DerivedKind,
    pub points: Vec<(f64, f64)>,
    pub y_bounds: [f64; 2],
}

/// Everything needed to draw both charts.
#[derive(Debug, Clone)]
pub struct PlotData {
    pub series: Vec<PlotSeries>,
    pub x_bounds: [f64; 2],
    /// Y bounds covering every series (overlay chart).
    pub y_bounds: [f64; 2],
}

impl PlotData {
    pub fn from_output(output: &AnalysisOutput) -> Self {
        let series: Vec<PlotSeries> = output
            .derived()
            .map(|(kind, s)| {
                let points: Vec<(f64, f64)> = s.points.iter().map(|&(d, v)| (date_to_x(d), v)).collect();
                let y_bounds = padded_bounds(points.iter().map(|p| p.1));
                PlotSeries { kind, points, y_bounds }
            })
            .collect();

        let x_bounds = padded_bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let y_bounds = padded_bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

        Self {
            series,
            x_bounds,
            y_bounds,
        }
    }
}

/// Colours and sizes for a rendering target.
#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    pub foreground: RGBColor,
    pub background: Option<RGBColor>,
    pub font_size: u32,
    pub margin: u32,
    pub y_label_area: u32,
    pub x_label_area: u32,
    pub line_width: u32,
    pub palette: [RGBColor; 4],
}

impl ChartTheme {
    /// High-contrast palette for low-resolution terminal cells.
    pub const TERMINAL: ChartTheme = ChartTheme {
        foreground: WHITE,
        background: None,
        font_size: 10,
        margin: 1,
        y_label_area: 6,
        x_label_area: 3,
        line_width: 1,
        palette: [
            RGBColor(0, 255, 255), // cyan
            RGBColor(255, 255, 0), // yellow
            RGBColor(0, 255, 0),   // green
            RGBColor(255, 0, 255), // magenta
        ],
    };

    pub const DOCUMENT: ChartTheme = ChartTheme {
        foreground: BLACK,
        background: Some(WHITE),
        font_size: 16,
        margin: 12,
        y_label_area: 60,
        x_label_area: 40,
        line_width: 2,
        palette: [
            RGBColor(31, 119, 180),
            RGBColor(255, 127, 14),
            RGBColor(44, 160, 44),
            RGBColor(214, 39, 40),
        ],
    };

    pub fn color(&self, kind: DerivedKind) -> RGBColor {
        match kind {
            DerivedKind::Effective => self.palette[0],
            DerivedKind::Pure => self.palette[1],
            DerivedKind::Adaptive => self.palette[2],
            DerivedKind::Hybrid => self.palette[3],
        }
    }
}

pub const OVERLAY_TITLE: &str = "Inflation over time";
pub const X_DESC: &str = "Date";
pub const Y_DESC: &str = "Inflation (%)";

/// All four series on one set of axes, with a legend.
pub fn draw_overlay<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &PlotData,
    theme: &ChartTheme,
    caption: Option<&str>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(bg) = theme.background {
        root.fill(&bg)?;
    }

    let [x0, x1] = data.x_bounds;
    let [y0, y1] = data.y_bounds;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .set_label_area_size(LabelAreaPosition::Left, theme.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, theme.x_label_area);
    if let Some(text) = caption {
        builder.caption(text, ("sans-serif", theme.font_size + 4).into_font().color(&theme.foreground));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&|v| fmt_year(*v))
        .y_label_formatter(&|v| fmt_pct(*v))
        .label_style(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
        .axis_style(&theme.foreground)
        .bold_line_style(&theme.foreground)
        .draw()?;

    for s in &data.series {
        let color = theme.color(s.kind);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(theme.line_width)))?
            .label(s.kind.display_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
        .border_style(&theme.foreground)
        .draw()?;

    Ok(())
}

/// One row per series, shared x range, each row titled by its variant.
pub fn draw_stacked<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &PlotData,
    theme: &ChartTheme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(bg) = theme.background {
        root.fill(&bg)?;
    }

    let rows = root.split_evenly((data.series.len().max(1), 1));
    let [x0, x1] = data.x_bounds;

    for (area, s) in rows.iter().zip(&data.series) {
        let [y0, y1] = s.y_bounds;
        let color = theme.color(s.kind);

        let mut chart = ChartBuilder::on(area)
            .margin(theme.margin)
            .caption(
                s.kind.display_name(),
                ("sans-serif", theme.font_size).into_font().color(&color),
            )
            .set_label_area_size(LabelAreaPosition::Left, theme.y_label_area)
            .set_label_area_size(LabelAreaPosition::Bottom, theme.x_label_area)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(6)
            .y_labels(3)
            .x_label_formatter(&|v| fmt_year(*v))
            .y_label_formatter(&|v| fmt_pct(*v))
            .label_style(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
            .axis_style(&theme.foreground)
            .draw()?;

        chart.draw_series(LineSeries::new(
            s.points.iter().copied(),
            color.stroke_width(theme.line_width),
        ))?;
    }

    Ok(())
}

/// Map a date to a fractional year (`2012-11-01` -> `2012.833`).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.year() as f64 + (date.month0() as f64 + (date.day0() as f64 / 31.0)) / 12.0
}

fn fmt_year(v: f64) -> String {
    // Nudge so that `2013.0 - ε` still labels as 2013.
    format!("{:.0}", (v + 1e-6).floor())
}

fn fmt_pct(v: f64) -> String {
    format!("{v:.1}")
}

/// Min/max of `values` with 5% padding; a degenerate range gets a unit span.
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if hi <= lo {
        return [lo - 0.5, hi + 0.5];
    }

    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_map_to_fractional_years() {
        let nov = NaiveDate::from_ymd_opt(2012, 11, 1).unwrap();
        let jan = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        assert!((date_to_x(nov) - (2012.0 + 10.0 / 12.0)).abs() < 1e-12);
        assert!(date_to_x(jan) > date_to_x(nov));
        assert_eq!(fmt_year(date_to_x(jan)), "2013");
    }

    #[test]
    fn bounds_are_padded_and_never_degenerate() {
        assert_eq!(padded_bounds([1.0, 1.0].into_iter()), [0.5, 1.5]);
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
        let [lo, hi] = padded_bounds([0.0, 10.0, f64::NAN].into_iter());
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }
}
