#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point on the drawing surface, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of the hosting element in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the element has been laid out with a non-empty, finite area.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Backing-buffer dimensions for this CSS size at the given pixel ratio.
    #[must_use]
    pub fn backing(&self, dpr: f64) -> (u32, u32) {
        (to_pixels(self.width * dpr), to_pixels(self.height * dpr))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}

/// Sanitize a device pixel ratio reported by the environment.
///
/// Anything non-finite or non-positive falls back to 1.0, matching the
/// browser's `devicePixelRatio || 1` convention.
#[must_use]
pub fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}
