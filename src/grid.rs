//! Precomputed per-cell animation parameters.
//!
//! The table has a fixed size chosen independently of the viewport and is
//! tiled across the visible grid by modulo indexing. Resizing the surface
//! never regenerates it, so a dot keeps its phase while the window changes
//! size as long as its tiled index is unchanged.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use rand::Rng;

use crate::consts::TAU;

/// Random oscillation parameters for one table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParams {
    /// Starting point of the oscillation, in `[0, 2π)`.
    pub phase: f64,
    /// Angular speed in radians per second.
    pub speed: f64,
}

/// Row-major table of [`CellParams`], generated once per renderer lifetime.
#[derive(Debug, Clone)]
pub struct GridTable {
    rows: usize,
    cols: usize,
    cells: Vec<CellParams>,
}

impl GridTable {
    /// Fill a `rows x cols` table from `rng`.
    ///
    /// Phases are uniform in `[0, 2π)` and speeds uniform in
    /// `[speed_min, speed_max)`. Zero dimensions are clamped to one so that
    /// [`GridTable::cell`] is total. An empty, inverted or non-finite speed
    /// range yields `speed_min` for every cell.
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, speed_min: f64, speed_max: f64, rng: &mut R) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let speed_varies = speed_max > speed_min && (speed_max - speed_min).is_finite();
        let cells = (0..rows * cols)
            .map(|_| {
                let phase = rng.random_range(0.0..TAU);
                let speed = if speed_varies { rng.random_range(speed_min..speed_max) } else { speed_min };
                CellParams { phase, speed }
            })
            .collect();
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Parameters for an on-screen cell, wrapping both coordinates.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> CellParams {
        self.cells[(row % self.rows) * self.cols + (col % self.cols)]
    }

    /// Iterate every stored cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellParams> {
        self.cells.iter()
    }
}
