//! Error taxonomy for the renderer.
//!
//! None of these reach the host page as exceptions: the background is purely
//! decorative, so the browser layer logs them and either keeps the loop alive
//! or degrades to a no-op handle.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// `getContext("2d")` returned nothing or a non-2D context.
    #[error("2d drawing context unavailable")]
    ContextUnavailable,

    /// Not running inside a browser window.
    #[error("browser window unavailable")]
    NoWindow,

    /// `requestAnimationFrame` was rejected or no frame callback is installed.
    #[error("frame scheduling failed: {0}")]
    Schedule(String),

    /// A 2D context call threw.
    #[error("canvas operation failed: {0}")]
    Canvas(String),

    /// The theme attribute observer could not be attached.
    #[error("theme observer failed: {0}")]
    Observer(String),
}
