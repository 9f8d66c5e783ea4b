//! Shared numeric constants and defaults for the dot grid.

// ── Math ────────────────────────────────────────────────────────

/// 2π: one full oscillation, and the exclusive upper bound of a cell phase.
pub const TAU: f64 = std::f64::consts::TAU;

// ── Grid geometry (CSS pixels) ──────────────────────────────────

/// Distance between neighbouring dot centers.
pub const DEFAULT_SPACING_PX: f64 = 18.0;

/// Smallest accepted spacing.
pub const MIN_SPACING_PX: f64 = 1.0;

/// Upper bound on dots along one axis, whatever the surface size.
pub const MAX_AXIS_DOTS: usize = 4096;

/// Empty margin kept on all four edges of the surface.
pub const DEFAULT_PADDING_PX: f64 = 18.0;

/// Dot radius (half the side length for square dots).
pub const DEFAULT_DOT_RADIUS_PX: f64 = 1.5;

/// Every `n`th diagonal, `(row + col) % n == 0`, is drawn as a stripe.
pub const DEFAULT_STRIPE_INTERVAL: u32 = 4;

// ── Precomputed parameter table ─────────────────────────────────

/// Rows in the tiled phase/speed table.
pub const DEFAULT_MAX_ROWS: usize = 80;

/// Columns in the tiled phase/speed table.
pub const DEFAULT_MAX_COLS: usize = 100;

/// Slowest oscillation speed in radians per second (inclusive).
pub const DEFAULT_SPEED_MIN: f64 = 1.5;

/// Fastest oscillation speed in radians per second (exclusive).
pub const DEFAULT_SPEED_MAX: f64 = 3.5;

// ── Opacity ─────────────────────────────────────────────────────

pub const STRIPE_OPACITY_MIN: f64 = 0.08;
pub const STRIPE_OPACITY_MAX: f64 = 0.45;

pub const FIELD_OPACITY_MIN: f64 = 0.02;
pub const FIELD_OPACITY_MAX: f64 = 0.12;

// ── Theme ───────────────────────────────────────────────────────

/// Attribute on `<html>` the host writes the color scheme into.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-color-scheme";

/// Attribute value that selects the dark palette.
pub const DEFAULT_DARK_TOKEN: &str = "dark";

/// Dot color on a light background.
pub const LIGHT_DOT_RGB: (u8, u8, u8) = (100, 100, 100);

/// Dot color on a dark background.
pub const DARK_DOT_RGB: (u8, u8, u8) = (200, 200, 200);
