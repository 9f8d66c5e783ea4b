//! Animated dot-grid background for canvas surfaces.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It paints a
//! field of softly twinkling dots, with brighter diagonal stripes, into a
//! `<canvas>` the host page hands it, keeps the backing buffer matched to the
//! element's size and the display's pixel density, and switches palette when
//! the page's color scheme changes. The host only mounts and unmounts it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`web`] | Browser bindings and the exported [`web::DotGridBackground`] handle |
//! | [`engine`] | Start/stop state machine and frame loop ([`engine::DotGridCore`]) |
//! | [`render`] | Paints one frame of dots |
//! | [`surface`] | Drawing-surface trait and backing-buffer resize detection |
//! | [`grid`] | Precomputed per-cell phase/speed table |
//! | [`pattern`] | Layout, stripe, twinkle and opacity math |
//! | [`theme`] | Light/dark signal and colors |
//! | [`config`] | Host options with defaults and validation |
//! | [`geometry`] | Points, sizes and pixel-ratio helpers |
//! | [`error`] | Error types |
//! | [`logging`] | Console logger setup |
//! | [`consts`] | Default values |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod pattern;
pub mod render;
pub mod surface;
pub mod theme;
pub mod web;

#[cfg(test)]
#[path = "mocks_test.rs"]
pub(crate) mod mocks;
