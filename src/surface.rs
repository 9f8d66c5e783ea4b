//! Drawing-surface contract and per-frame backing-buffer management.
//!
//! [`Surface`] is the seam between the renderer and whatever actually holds
//! pixels: [`crate::web::CanvasSurface`] in the browser, a recording mock in
//! tests. [`SurfaceManager`] runs at the top of every frame and keeps the
//! backing buffer sized to `css size * device pixel ratio`, touching it only
//! when one of those inputs actually changed. Reassigning a canvas's width or
//! height discards its buffer, so doing it every frame would flicker.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::geometry::{Point, Size, sanitize_dpr};
use crate::theme::Rgb;

/// Shape used for each dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotShape {
    #[default]
    Circle,
    Square,
}

/// Fill parameters for a single dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub color: Rgb,
    pub alpha: f64,
    /// Radius for circles, half the side length for squares.
    pub radius: f64,
    pub shape: DotShape,
}

/// A 2D raster target the renderer paints into.
///
/// All coordinates are CSS pixels; the implementation applies the scale set by
/// [`Surface::set_scale`].
pub trait Surface {
    /// Current layout size of the hosting element.
    fn css_size(&self) -> Size;

    /// Physical pixels per CSS pixel, as reported by the environment.
    fn device_pixel_ratio(&self) -> f64;

    /// Reallocate the backing pixel buffer.
    fn resize_backing(&mut self, width: u32, height: u32);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f64) -> Result<(), RenderError>;

    /// Clear `[0, width] x [0, height]`.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_dot(&mut self, center: Point, style: &DotStyle) -> Result<(), RenderError>;
}

/// Geometry of a frame that is ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub size: Size,
    pub dpr: f64,
    /// The backing buffer was reallocated for this frame.
    pub resized: bool,
}

/// Result of [`SurfaceManager::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prepared {
    /// Element not laid out yet; nothing was touched.
    Skipped,
    Ready(FrameGeometry),
}

/// Tracks the last size the backing buffer was allocated for.
#[derive(Debug, Clone, Default)]
pub struct SurfaceManager {
    last_size: Size,
    last_dpr: f64,
    resize_count: u64,
}

impl SurfaceManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize if needed, reset the transform and clear the visible area.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the scale transform.
    pub fn prepare<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Prepared, RenderError> {
        let size = surface.css_size();
        if !size.is_drawable() {
            return Ok(Prepared::Skipped);
        }
        let dpr = sanitize_dpr(surface.device_pixel_ratio());

        let resized = size != self.last_size || dpr.to_bits() != self.last_dpr.to_bits();
        if resized {
            let (width, height) = size.backing(dpr);
            surface.resize_backing(width, height);
            self.last_size = size;
            self.last_dpr = dpr;
            self.resize_count += 1;
            tracing::debug!(css_w = size.width, css_h = size.height, dpr, width, height, "backing buffer resized");
        }

        surface.set_scale(dpr)?;
        surface.clear(size.width, size.height);

        Ok(Prepared::Ready(FrameGeometry { size, dpr, resized }))
    }

    /// CSS size the backing buffer was last sized for.
    #[must_use]
    pub fn last_size(&self) -> Size {
        self.last_size
    }

    /// Number of backing-buffer reallocations so far.
    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }
}
