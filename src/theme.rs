//! Theme signal: the light/dark flag the renderer reads every frame.
//!
//! The host owns the theme and is the only writer. The renderer holds a
//! [`ThemeSignal`] handle and reads it at the start of each frame, so a change
//! shows up in the very next painted frame. In the browser,
//! [`crate::web::ThemeObserver`] keeps the signal in sync with an attribute on
//! `<html>`; hosts may also push values directly.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a color-scheme attribute value.
    ///
    /// Only an exact match of `dark_token` selects [`Theme::Dark`]; a missing
    /// attribute or any other value is light.
    #[must_use]
    pub fn from_attribute(value: Option<&str>, dark_token: &str) -> Self {
        match value {
            Some(v) if v == dark_token => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba(...)` string with the given alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn rgba_css(self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        format!("rgba({}, {}, {}, {alpha:.3})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Shared, observable theme value.
///
/// Cloning yields another handle onto the same value. `version` increments on
/// every effective change so readers can tell whether anything moved since
/// they last looked.
#[derive(Debug, Clone, Default)]
pub struct ThemeSignal {
    inner: Rc<SignalState>,
}

#[derive(Debug, Default)]
struct SignalState {
    theme: Cell<Theme>,
    version: Cell<u64>,
}

impl ThemeSignal {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { inner: Rc::new(SignalState { theme: Cell::new(theme), version: Cell::new(0) }) }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> Theme {
        self.inner.theme.get()
    }

    /// Store a new value. Returns `true` if it differed from the old one.
    pub fn set(&self, theme: Theme) -> bool {
        if self.inner.theme.get() == theme {
            return false;
        }
        self.inner.theme.set(theme);
        self.inner.version.set(self.inner.version.get().wrapping_add(1));
        tracing::debug!(?theme, "theme changed");
        true
    }

    /// Number of effective changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }
}
