//! Rendering: paints one frame of the dot field onto a [`Surface`].
//!
//! This module only issues fill calls. It receives a prepared surface (sized,
//! scaled and cleared by [`crate::surface::SurfaceManager`]), the parameter
//! table, the options and the current elapsed time, and does not mutate any
//! renderer state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::DotGridConfig;
use crate::error::RenderError;
use crate::geometry::Size;
use crate::grid::GridTable;
use crate::pattern::{GridLayout, is_striped, twinkle};
use crate::surface::{DotStyle, Surface};
use crate::theme::{Rgb, Theme};

/// What a painted frame contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintStats {
    pub layout: GridLayout,
    pub dots: usize,
    pub striped: usize,
    pub theme: Theme,
    pub color: Rgb,
}

/// Draw every visible dot at `elapsed_secs`.
///
/// # Errors
///
/// Returns `Err` on the first fill the surface rejects; dots drawn before it
/// stay on the surface.
pub fn paint_dots<S: Surface + ?Sized>(
    surface: &mut S,
    grid: &GridTable,
    config: &DotGridConfig,
    size: Size,
    elapsed_secs: f64,
    theme: Theme,
) -> Result<PaintStats, RenderError> {
    let layout = GridLayout::for_size(size, config.spacing, config.padding);
    let color = config.dot_color(theme);
    let mut striped = 0;

    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let on_stripe = is_striped(row, col, config.stripe_interval);
            let cell = grid.cell(row, col);
            let alpha = config.opacity_range(on_stripe).at(twinkle(elapsed_secs, cell.phase, cell.speed));
            let center = GridLayout::position(row, col, config.spacing, config.padding);
            surface.fill_dot(center, &DotStyle { color, alpha, radius: config.dot_radius, shape: config.dot_shape })?;
            if on_stripe {
                striped += 1;
            }
        }
    }

    Ok(PaintStats { layout, dots: layout.cell_count(), striped, theme, color })
}
