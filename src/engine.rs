use rand::Rng;

use crate::config::DotGridConfig;
use crate::error::RenderError;
use crate::grid::GridTable;
use crate::render::{self, PaintStats};
use crate::surface::{Prepared, Surface, SurfaceManager};
use crate::theme::{Theme, ThemeSignal};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Opaque id of a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Per-frame scheduling primitive (`requestAnimationFrame` in the browser).
///
/// The callback target is fixed by the implementation; every request asks for
/// exactly one future invocation of it.
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Schedule`] if the environment refuses.
    fn request_frame(&mut self) -> Result<FrameHandle, RenderError>;

    /// Cancel a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Animation loop state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoopState {
    /// No callback scheduled; nothing will be painted.
    #[default]
    Stopped,
    Running {
        /// Clock reading when the loop started, milliseconds.
        start_ms: f64,
        /// Callback requested and not yet delivered.
        pending: Option<FrameHandle>,
    },
}

/// What happened during a frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Callback arrived while stopped; ignored.
    Idle,
    /// Surface has no area yet; nothing painted, next frame requested.
    Skipped,
    Painted(FrameReport),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub elapsed_secs: f64,
    pub resized: bool,
    pub stats: PaintStats,
}

/// Core renderer state: everything that does not depend on the browser.
///
/// Separated from [`crate::web::DotGridBackground`] so the loop can be driven
/// by mock surfaces and schedulers in tests.
pub struct DotGridCore {
    config: DotGridConfig,
    grid: GridTable,
    buffer: SurfaceManager,
    theme: ThemeSignal,
    state: LoopState,
    frames_painted: u64,
}

impl DotGridCore {
    /// Build a stopped renderer, drawing the parameter table from `rng`.
    ///
    /// `config` is used as given; hosts run [`DotGridConfig::validate`] first.
    /// An unusable speed range still yields a table, with every speed at
    /// `speed_min`.
    pub fn new<R: Rng + ?Sized>(config: DotGridConfig, theme: ThemeSignal, rng: &mut R) -> Self {
        let grid = GridTable::generate(config.max_rows, config.max_cols, config.speed_min, config.speed_max, rng);
        Self { config, grid, buffer: SurfaceManager::new(), theme, state: LoopState::Stopped, frames_painted: 0 }
    }

    // --- Lifecycle ---

    /// Start the loop: record `now_ms` as the time origin and request the
    /// first frame. Does nothing if already running.
    ///
    /// # Errors
    ///
    /// Returns the scheduler's error; the loop stays stopped.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F, now_ms: f64) -> Result<(), RenderError> {
        if self.is_running() {
            return Ok(());
        }
        let handle = scheduler.request_frame()?;
        self.state = LoopState::Running { start_ms: now_ms, pending: Some(handle) };
        tracing::debug!(start_ms = now_ms, "dot grid started");
        Ok(())
    }

    /// Cancel the pending frame and stop. After this returns no callback can
    /// paint, even one already queued by the environment.
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if let LoopState::Running { pending, .. } = self.state {
            if let Some(handle) = pending {
                scheduler.cancel_frame(handle);
            }
            tracing::debug!(frames = self.frames_painted, "dot grid stopped");
        }
        self.state = LoopState::Stopped;
    }

    /// Handle one frame callback at clock reading `now_ms`.
    ///
    /// Paints (unless stopped or the surface has no area), then requests the
    /// next frame before returning. A paint error is returned after the next
    /// frame has been requested, so a transient canvas failure does not end
    /// the loop. A failed request does: the state becomes `Stopped`.
    ///
    /// # Errors
    ///
    /// Returns the surface error or the scheduler error.
    pub fn on_frame<F, S>(&mut self, scheduler: &mut F, surface: &mut S, now_ms: f64) -> Result<FrameOutcome, RenderError>
    where
        F: FrameScheduler + ?Sized,
        S: Surface + ?Sized,
    {
        let LoopState::Running { start_ms, .. } = self.state else {
            return Ok(FrameOutcome::Idle);
        };
        self.state = LoopState::Running { start_ms, pending: None };

        let elapsed_secs = if self.config.reduced_motion { 0.0 } else { ((now_ms - start_ms) / 1000.0).max(0.0) };
        let painted = self.paint(surface, elapsed_secs);

        match scheduler.request_frame() {
            Ok(handle) => self.state = LoopState::Running { start_ms, pending: Some(handle) },
            Err(err) => {
                self.state = LoopState::Stopped;
                tracing::warn!(error = %err, "dot grid loop ended: next frame could not be scheduled");
                return Err(err);
            }
        }

        painted
    }

    fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S, elapsed_secs: f64) -> Result<FrameOutcome, RenderError> {
        let geometry = match self.buffer.prepare(surface)? {
            Prepared::Skipped => return Ok(FrameOutcome::Skipped),
            Prepared::Ready(geometry) => geometry,
        };
        let theme = self.theme.get();
        let stats = render::paint_dots(surface, &self.grid, &self.config, geometry.size, elapsed_secs, theme)?;
        self.frames_painted += 1;
        Ok(FrameOutcome::Painted(FrameReport { elapsed_secs, resized: geometry.resized, stats }))
    }

    // --- Queries ---

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &DotGridConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &GridTable {
        &self.grid
    }

    /// Theme the next frame will use.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Handle onto the theme signal, for hosts that push values directly.
    #[must_use]
    pub fn theme_signal(&self) -> ThemeSignal {
        self.theme.clone()
    }

    #[must_use]
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.buffer.resize_count()
    }
}
