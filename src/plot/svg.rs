//! SVG rendering of the overlay and stacked charts.

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::{ChartTheme, OVERLAY_TITLE, PlotData, draw_overlay, draw_stacked};

pub const OVERLAY_SIZE: (u32, u32) = (1200, 600);
/// The stacked chart is tall: four rows of roughly 250px each.
pub const STACKED_SIZE: (u32, u32) = (1200, 1000);

/// Write the overlay chart (all series, one axis set) to `path`.
pub fn write_overlay_svg(path: &Path, data: &PlotData) -> Result<(), AppError> {
    let root = SVGBackend::new(path, OVERLAY_SIZE).into_drawing_area();
    draw_overlay(&root, data, &ChartTheme::DOCUMENT, Some(OVERLAY_TITLE))
        .map_err(|e| AppError::Export(format!("failed to draw '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::Export(format!("failed to write '{}': {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Write the four-row stacked chart to `path`.
pub fn write_stacked_svg(path: &Path, data: &PlotData) -> Result<(), AppError> {
    let root = SVGBackend::new(path, STACKED_SIZE).into_drawing_area();
    draw_stacked(&root, data, &ChartTheme::DOCUMENT)
        .map_err(|e| AppError::Export(format!("failed to draw '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::Export(format!("failed to write '{}': {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
