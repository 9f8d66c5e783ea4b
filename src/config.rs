//! Renderer options.
//!
//! Every field has a default, so hosts may pass a partial JSON object (or
//! nothing) and only override what they care about:
//!
//! ```json
//! { "spacing": 24, "dot_shape": "square", "dark_color": { "r": 220, "g": 220, "b": 220 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DARK_DOT_RGB, DEFAULT_DARK_TOKEN, DEFAULT_DOT_RADIUS_PX, DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS, DEFAULT_PADDING_PX,
    DEFAULT_SPACING_PX, DEFAULT_SPEED_MAX, DEFAULT_SPEED_MIN, DEFAULT_STRIPE_INTERVAL, DEFAULT_THEME_ATTRIBUTE,
    FIELD_OPACITY_MAX, FIELD_OPACITY_MIN, LIGHT_DOT_RGB, MIN_SPACING_PX, STRIPE_OPACITY_MAX, STRIPE_OPACITY_MIN,
};
use crate::pattern::OpacityRange;
use crate::surface::DotShape;
use crate::theme::{Rgb, Theme};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid option `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotGridConfig {
    /// Distance between dot centers, CSS pixels.
    pub spacing: f64,
    /// Empty margin on every edge, CSS pixels.
    pub padding: f64,
    pub dot_radius: f64,
    pub dot_shape: DotShape,
    pub stripe_interval: u32,
    /// Rows in the tiled parameter table.
    pub max_rows: usize,
    /// Columns in the tiled parameter table.
    pub max_cols: usize,
    pub speed_min: f64,
    pub speed_max: f64,
    pub stripe_opacity: OpacityRange,
    pub field_opacity: OpacityRange,
    pub light_color: Rgb,
    pub dark_color: Rgb,
    /// Attribute on the document root carrying the color scheme.
    pub theme_attribute: String,
    /// Attribute value that means dark mode.
    pub dark_token: String,
    /// Paint a static field instead of animating.
    pub reduced_motion: bool,
    /// Fixed seed for the parameter table; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for DotGridConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING_PX,
            padding: DEFAULT_PADDING_PX,
            dot_radius: DEFAULT_DOT_RADIUS_PX,
            dot_shape: DotShape::Circle,
            stripe_interval: DEFAULT_STRIPE_INTERVAL,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            stripe_opacity: OpacityRange::new(STRIPE_OPACITY_MIN, STRIPE_OPACITY_MAX),
            field_opacity: OpacityRange::new(FIELD_OPACITY_MIN, FIELD_OPACITY_MAX),
            light_color: Rgb::from(LIGHT_DOT_RGB),
            dark_color: Rgb::from(DARK_DOT_RGB),
            theme_attribute: DEFAULT_THEME_ATTRIBUTE.to_owned(),
            dark_token: DEFAULT_DARK_TOKEN.to_owned(),
            reduced_motion: false,
            seed: None,
        }
    }
}

impl DotGridConfig {
    /// Parse and validate a (possibly partial) JSON options object.
    ///
    /// An empty or whitespace-only string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails [`DotGridConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can produce a sensible frame.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spacing.is_finite() && self.spacing >= MIN_SPACING_PX) {
            return Err(invalid("spacing", "must be at least 1 CSS pixel"));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(invalid("padding", "must be zero or a positive number"));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(invalid("dot_radius", "must be a positive number"));
        }
        if self.stripe_interval == 0 {
            return Err(invalid("stripe_interval", "must be at least 1"));
        }
        if self.max_rows == 0 {
            return Err(invalid("max_rows", "must be at least 1"));
        }
        if self.max_cols == 0 {
            return Err(invalid("max_cols", "must be at least 1"));
        }
        if !(self.speed_min.is_finite() && self.speed_min >= 0.0) {
            return Err(invalid("speed_min", "must be zero or a positive number"));
        }
        if !(self.speed_max.is_finite() && self.speed_max > self.speed_min) {
            return Err(invalid("speed_max", "must be greater than speed_min"));
        }
        if !valid_opacity(self.stripe_opacity) {
            return Err(invalid("stripe_opacity", "must satisfy 0 <= min <= max <= 1"));
        }
        if !valid_opacity(self.field_opacity) {
            return Err(invalid("field_opacity", "must satisfy 0 <= min <= max <= 1"));
        }
        if self.theme_attribute.trim().is_empty() {
            return Err(invalid("theme_attribute", "must not be empty"));
        }
        Ok(())
    }

    /// Opacity band for a cell.
    #[must_use]
    pub fn opacity_range(&self, striped: bool) -> OpacityRange {
        if striped { self.stripe_opacity } else { self.field_opacity }
    }

    /// Dot color for a theme.
    #[must_use]
    pub fn dot_color(&self, theme: Theme) -> Rgb {
        match theme {
            Theme::Light => self.light_color,
            Theme::Dark => self.dark_color,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn valid_opacity(range: OpacityRange) -> bool {
    (0.0..=1.0).contains(&range.min) && (0.0..=1.0).contains(&range.max) && range.min <= range.max
}
