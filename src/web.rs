//! Browser bindings.
//!
//! Implements the renderer's seams against the DOM ([`CanvasSurface`],
//! [`WindowScheduler`], [`ThemeObserver`]) and exports [`DotGridBackground`],
//! the handle a host page mounts onto a `<canvas>`:
//!
//! ```js
//! const grid = DotGridBackground.mount(canvas);
//! // ... later, when content takes over the view
//! grid.unmount();
//! ```
//!
//! Failures never reach the page as exceptions. A canvas without a 2D context
//! yields a handle that paints nothing; per-frame errors are logged once each.

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MutationObserver, MutationObserverInit, Window};

use crate::config::DotGridConfig;
use crate::consts::TAU;
use crate::engine::{DotGridCore, FrameHandle, FrameScheduler};
use crate::error::RenderError;
use crate::geometry::{Point, Size};
use crate::surface::{DotShape, DotStyle, Surface};
use crate::theme::{Theme, ThemeSignal};

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

// =============================================================
// Surface
// =============================================================

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    window: Window,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextUnavailable`] if the element has no 2D
    /// context (already bound to WebGL, or unsupported).
    pub fn new(canvas: HtmlCanvasElement, window: Window) -> Result<Self, RenderError> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().map_err(|_| RenderError::ContextUnavailable)?,
            Ok(None) => return Err(RenderError::ContextUnavailable),
            Err(err) => {
                tracing::debug!(error = %js_message(&err), "getContext threw");
                return Err(RenderError::ContextUnavailable);
            }
        };
        Ok(Self { canvas, ctx, window })
    }
}

impl Surface for CanvasSurface {
    fn css_size(&self) -> Size {
        let rect = self.canvas.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_scale(&mut self, scale: f64) -> Result<(), RenderError> {
        self.ctx
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(|e| RenderError::Canvas(js_message(&e)))
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_dot(&mut self, center: Point, style: &DotStyle) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(&style.color.rgba_css(style.alpha));
        match style.shape {
            DotShape::Circle => {
                self.ctx.begin_path();
                self.ctx
                    .arc(center.x, center.y, style.radius, 0.0, TAU)
                    .map_err(|e| RenderError::Canvas(js_message(&e)))?;
                self.ctx.fill();
            }
            DotShape::Square => {
                let side = style.radius * 2.0;
                self.ctx.fill_rect(center.x - style.radius, center.y - style.radius, side, side);
            }
        }
        Ok(())
    }
}

// =============================================================
// Scheduler
// =============================================================

/// `requestAnimationFrame` bound to a single installed callback.
pub struct WindowScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl WindowScheduler {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window, callback: None }
    }

    /// Set the function every future request will invoke.
    pub fn install(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }

    /// Current reading of the clock `requestAnimationFrame` timestamps use.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.window.performance().map_or_else(js_sys::Date::now, |p| p.now())
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, RenderError> {
        let Some(callback) = self.callback.as_ref() else {
            return Err(RenderError::Schedule("no frame callback installed".to_owned()));
        };
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| RenderError::Schedule(js_message(&e)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            tracing::debug!(handle = handle.0, error = %js_message(&err), "cancelAnimationFrame failed");
        }
    }
}

// =============================================================
// Theme observer
// =============================================================

/// Mirrors one attribute of an element into a [`ThemeSignal`].
///
/// Disconnects when dropped.
pub struct ThemeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl ThemeObserver {
    /// Read `attribute` on `root` now and after every change to it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Observer`] if the `MutationObserver` cannot be
    /// created or attached.
    pub fn attach(root: &Element, attribute: &str, dark_token: &str, signal: ThemeSignal) -> Result<Self, RenderError> {
        let read = {
            let root = root.clone();
            let attribute = attribute.to_owned();
            let dark_token = dark_token.to_owned();
            move || Theme::from_attribute(root.get_attribute(&attribute).as_deref(), &dark_token)
        };

        signal.set(read());
        let callback = Closure::wrap(Box::new(move || {
            signal.set(read());
        }) as Box<dyn FnMut()>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| RenderError::Observer(js_message(&e)))?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(attribute)));
        observer
            .observe_with_options(root, &init)
            .map_err(|e| RenderError::Observer(js_message(&e)))?;

        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for ThemeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// =============================================================
// Exported handle
// =============================================================

struct Mounted {
    core: DotGridCore,
    surface: CanvasSurface,
    scheduler: WindowScheduler,
    _theme_observer: Option<ThemeObserver>,
    last_error: Option<RenderError>,
}

impl Mounted {
    fn on_frame(&mut self, now_ms: f64) {
        match self.core.on_frame(&mut self.scheduler, &mut self.surface, now_ms) {
            Ok(_) => self.last_error = None,
            Err(err) => {
                if self.last_error.as_ref() != Some(&err) {
                    tracing::warn!(error = %err, "dot grid frame failed");
                }
                self.last_error = Some(err);
            }
        }
    }
}

/// Animated dot-grid background bound to one `<canvas>`.
///
/// Animates from `mount` until `unmount` (or until the handle is freed).
#[wasm_bindgen]
pub struct DotGridBackground {
    mounted: Option<Rc<RefCell<Mounted>>>,
}

#[wasm_bindgen]
impl DotGridBackground {
    /// Mount with default options.
    pub fn mount(canvas: HtmlCanvasElement) -> DotGridBackground {
        Self::mount_config(canvas, DotGridConfig::default())
    }

    /// Mount with a JSON options object; see [`DotGridConfig`].
    ///
    /// Invalid options are logged and replaced by the defaults.
    #[wasm_bindgen(js_name = mountWithOptions)]
    pub fn mount_with_options(canvas: HtmlCanvasElement, options: &str) -> DotGridBackground {
        let config = DotGridConfig::from_json(options).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring dot grid options");
            DotGridConfig::default()
        });
        Self::mount_config(canvas, config)
    }

    /// Stop the animation and release the canvas. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        if let Ok(mut guard) = mounted.try_borrow_mut() {
            let state = &mut *guard;
            state.core.stop(&mut state.scheduler);
        } else {
            tracing::warn!("dot grid unmounted from inside its own frame");
        }
        tracing::debug!("dot grid unmounted");
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.try_borrow().is_ok_and(|s| s.core.is_running()))
    }

    /// Push a theme value directly instead of (or in addition to) the
    /// observed attribute.
    #[wasm_bindgen(js_name = setDark)]
    pub fn set_dark(&self, dark: bool) {
        if let Some(mounted) = &self.mounted {
            if let Ok(state) = mounted.try_borrow() {
                state.core.theme_signal().set(Theme::from_dark(dark));
            }
        }
    }

    #[wasm_bindgen(js_name = framesPainted)]
    pub fn frames_painted(&self) -> f64 {
        let Some(mounted) = &self.mounted else {
            return 0.0;
        };
        match mounted.try_borrow() {
            Ok(state) => to_js_number(state.core.frames_painted()),
            Err(_) => 0.0,
        }
    }
}

impl DotGridBackground {
    /// Mount with an already-built configuration.
    ///
    /// A configuration that fails [`DotGridConfig::validate`] is logged and
    /// replaced by the defaults.
    #[must_use]
    pub fn mount_config(canvas: HtmlCanvasElement, config: DotGridConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring dot grid options");
                DotGridConfig::default()
            }
        };
        match mount(canvas, config) {
            Ok(mounted) => Self { mounted: Some(mounted) },
            Err(err) => {
                tracing::warn!(error = %err, "dot grid background disabled");
                Self { mounted: None }
            }
        }
    }
}

impl Drop for DotGridBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn mount(canvas: HtmlCanvasElement, config: DotGridConfig) -> Result<Rc<RefCell<Mounted>>, RenderError> {
    let window = web_sys::window().ok_or(RenderError::NoWindow)?;
    let surface = CanvasSurface::new(canvas, window.clone())?;

    let theme = ThemeSignal::default();
    let theme_observer = attach_theme_observer(&window, &config, &theme);

    let seed = config.seed.unwrap_or_else(|| entropy_seed(&window));
    let core = DotGridCore::new(config, theme, &mut SmallRng::seed_from_u64(seed));

    let mounted = Rc::new(RefCell::new(Mounted {
        core,
        surface,
        scheduler: WindowScheduler::new(window),
        _theme_observer: theme_observer,
        last_error: None,
    }));

    // Weak: the callback lives inside `Mounted` and must not keep it alive.
    let weak: Weak<RefCell<Mounted>> = Rc::downgrade(&mounted);
    let callback = Closure::wrap(Box::new(move |now_ms: f64| {
        if !deliver_frame(&weak, now_ms) {
            tracing::trace!("frame after unmount ignored");
        }
    }) as Box<dyn FnMut(f64)>);

    let mut guard = mounted.borrow_mut();
    let state = &mut *guard;
    state.scheduler.install(callback);
    let now_ms = state.scheduler.now_ms();
    state.core.start(&mut state.scheduler, now_ms)?;
    drop(guard);

    tracing::debug!(seed, "dot grid mounted");
    Ok(mounted)
}

/// Run one frame if the renderer is still mounted; returns whether it was.
fn deliver_frame(target: &Weak<RefCell<Mounted>>, now_ms: f64) -> bool {
    let Some(mounted) = target.upgrade() else {
        return false;
    };
    match mounted.try_borrow_mut() {
        Ok(mut state) => {
            state.on_frame(now_ms);
            true
        }
        Err(_) => false,
    }
}

fn attach_theme_observer(window: &Window, config: &DotGridConfig, theme: &ThemeSignal) -> Option<ThemeObserver> {
    let root = window.document().and_then(|doc| doc.document_element())?;
    match ThemeObserver::attach(&root, &config.theme_attribute, &config.dark_token, theme.clone()) {
        Ok(observer) => Some(observer),
        Err(err) => {
            tracing::warn!(error = %err, "theme observer unavailable; using light palette");
            None
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn entropy_seed(window: &Window) -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let clock = window.performance().map_or(0.0, |p| p.now());
    ((hi << 32) | lo) ^ clock.to_bits()
}

#[allow(clippy::cast_precision_loss)]
fn to_js_number(value: u64) -> f64 {
    value as f64
}
