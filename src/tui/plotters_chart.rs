//! Plotters-powered inflation chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`,
//! reusing the same chart definitions as the SVG export.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{ChartTheme, PlotData, draw_overlay, draw_stacked};

/// Which of the two charts is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    Overlay,
    Stacked,
}

impl ChartView {
    pub fn toggle(self) -> Self {
        match self {
            ChartView::Overlay => ChartView::Stacked,
            ChartView::Stacked => ChartView::Overlay,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartView::Overlay => "Inflation over time (overlay)",
            ChartView::Stacked => "Inflation over time (stacked)",
        }
    }

    /// Smallest drawable area (columns, rows).
    fn min_size(self) -> (u16, u16) {
        match self {
            ChartView::Overlay => (20, 8),
            ChartView::Stacked => (20, 24),
        }
    }
}

/// A render-only chart: all series and bounds are computed outside `render()`.
pub struct InflationChart<'a> {
    pub data: &'a PlotData,
    pub view: ChartView,
}

impl<'a> Widget for InflationChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        let (min_w, min_h) = self.view.min_size();
        if area.width < min_w || area.height < min_h {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.data.x_bounds;
        let [y0, y1] = self.data.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let data = self.data;
        let view = self.view;
        let widget = widget_fn(move |root| {
            match view {
                ChartView::Overlay => draw_overlay(&root, data, &ChartTheme::TERMINAL, None)?,
                ChartView::Stacked => draw_stacked(&root, data, &ChartTheme::TERMINAL)?,
            }
            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_between_views() {
        assert_eq!(ChartView::Overlay.toggle(), ChartView::Stacked);
        assert_eq!(ChartView::Overlay.toggle().toggle(), ChartView::Overlay);
    }

    #[test]
    fn tiny_area_renders_hint() {
        let data = PlotData::from_output(&crate::app::pipeline::fixtures::mock_output());
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        InflationChart {
            data: &data,
            view: ChartView::Stacked,
        }
        .render(area, &mut buf);

        let first_row: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(first_row.starts_with("Chart area too small"));
    }
}
