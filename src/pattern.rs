//! Pure per-cell math: grid layout, stripe classification, twinkle and opacity.
//!
//! Nothing here touches a surface or a clock, so every function is a plain
//! input-to-output mapping and is tested as such.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_AXIS_DOTS;
use crate::geometry::{Point, Size};

/// Inclusive opacity band a twinkling dot moves through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityRange {
    pub min: f64,
    pub max: f64,
}

impl OpacityRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a twinkle value in `[0, 1]` onto this band.
    ///
    /// The result is pinned to the band so rounding at `twinkle == 1.0` can
    /// not step past `max`.
    #[must_use]
    pub fn at(self, twinkle: f64) -> f64 {
        (self.min + twinkle * (self.max - self.min)).max(self.min).min(self.max)
    }

    #[must_use]
    pub fn contains(self, opacity: f64) -> bool {
        opacity >= self.min && opacity <= self.max
    }
}

/// Smooth oscillation in `[0, 1]` for a cell at `elapsed_secs`.
#[must_use]
pub fn twinkle(elapsed_secs: f64, phase: f64, speed: f64) -> f64 {
    ((elapsed_secs * speed + phase).sin() + 1.0) / 2.0
}

/// Whether `(row, col)` lies on one of the diagonal stripes.
///
/// An interval of zero is treated as one (every cell is striped).
#[must_use]
pub fn is_striped(row: usize, col: usize, interval: u32) -> bool {
    let interval = usize::try_from(interval.max(1)).unwrap_or(usize::MAX);
    (row + col) % interval == 0
}

/// Number of visible rows and columns for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
}

impl GridLayout {
    /// Lay out a grid with `spacing` between dots and `padding` on every edge.
    ///
    /// Per axis: `floor((extent - 2 * padding) / spacing) + 1` when the extent
    /// fits both paddings, otherwise zero. The last dot may sit exactly on the
    /// padding line but never inside it. Each axis is capped at
    /// [`MAX_AXIS_DOTS`].
    #[must_use]
    pub fn for_size(size: Size, spacing: f64, padding: f64) -> Self {
        Self {
            cols: axis_count(size.width, spacing, padding),
            rows: axis_count(size.height, spacing, padding),
        }
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// Center of the dot at `(row, col)` in CSS pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(row: usize, col: usize, spacing: f64, padding: f64) -> Point {
        Point::new(padding + col as f64 * spacing, padding + row as f64 * spacing)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn axis_count(extent: f64, spacing: f64, padding: f64) -> usize {
    if !extent.is_finite() || !spacing.is_finite() || spacing <= 0.0 {
        return 0;
    }
    let usable = extent - 2.0 * padding.max(0.0);
    if usable < 0.0 {
        return 0;
    }
    let steps = (usable / spacing).floor();
    if steps >= (MAX_AXIS_DOTS - 1) as f64 {
        return MAX_AXIS_DOTS;
    }
    steps as usize + 1
}
