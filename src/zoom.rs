//! Level clamping, layered above [`ViewState`].
//!
//! The core never validates levels. UI code that wants zoom buttons or
//! wheel steps to stop at the projection's range goes through a
//! [`ZoomController`] instead of calling `set_level` directly.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use tracing::{debug, warn};

use crate::consts::DEFAULT_ZOOM_STEP;
use crate::error::ViewError;
use crate::projection::Projection;
use crate::state::ViewState;

/// Inclusive zoom level range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The projection's own level range.
    #[must_use]
    pub fn of(projection: &dyn Projection) -> Self {
        Self { min: projection.min_level(), max: projection.max_level() }
    }

    /// Clamp into range. NaN clamps to `min`.
    #[must_use]
    pub fn clamp(&self, level: f64) -> f64 {
        level.max(self.min).min(self.max)
    }

    #[must_use]
    pub fn contains(&self, level: f64) -> bool {
        level >= self.min && level <= self.max
    }
}

/// Stepped, range-checked zooming over a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    limits: ZoomLimits,
    step: f64,
}

impl ZoomController {
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self { limits, step: DEFAULT_ZOOM_STEP }
    }

    /// Controller bounded by the view's projection.
    #[must_use]
    pub fn for_view(state: &ViewState) -> Self {
        Self::new(ZoomLimits::of(state.projection().as_ref()))
    }

    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether the view can zoom in by any amount.
    #[must_use]
    pub fn can_zoom_in(&self, state: &ViewState) -> bool {
        state.level() < self.limits.max
    }

    #[must_use]
    pub fn can_zoom_out(&self, state: &ViewState) -> bool {
        state.level() > self.limits.min
    }

    /// One step finer, anchored at viewport pixel (x, y). Returns the applied level.
    pub fn zoom_in(&self, state: &mut ViewState, x: i32, y: i32) -> f64 {
        let level = state.level() + self.step;
        self.zoom_to_clamped(state, level, x, y)
    }

    /// One step coarser, anchored at viewport pixel (x, y). Returns the applied level.
    pub fn zoom_out(&self, state: &mut ViewState, x: i32, y: i32) -> f64 {
        let level = state.level() - self.step;
        self.zoom_to_clamped(state, level, x, y)
    }

    /// Set `level` if it is within limits.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::LevelOutOfRange`] without touching the view when
    /// `level` lies outside the limits (NaN included).
    pub fn zoom_to(&self, state: &mut ViewState, level: f64, x: i32, y: i32) -> Result<(), ViewError> {
        if !self.limits.contains(level) {
            warn!(level, min = self.limits.min, max = self.limits.max, "zoom level rejected");
            return Err(ViewError::LevelOutOfRange { level, min: self.limits.min, max: self.limits.max });
        }
        state.set_level(level, x, y);
        Ok(())
    }

    /// Set `level` after clamping it into the limits. Returns the applied level.
    #[allow(clippy::float_cmp)]
    pub fn zoom_to_clamped(&self, state: &mut ViewState, level: f64, x: i32, y: i32) -> f64 {
        let clamped = self.limits.clamp(level);
        if clamped != level {
            debug!(requested = level, applied = clamped, "zoom level clamped");
        }
        state.set_level(clamped, x, y);
        clamped
    }
}
