//! Initial view configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

use crate::consts::DEFAULT_ZOOM_STEP;
use crate::error::ViewError;
use crate::projection::Projection;
use crate::state::ViewState;
use crate::zoom::{ZoomController, ZoomLimits};

pub const ENV_INITIAL_LEVEL: &str = "MAPVIEW_INITIAL_LEVEL";
pub const ENV_CENTER_LAT: &str = "MAPVIEW_CENTER_LAT";
pub const ENV_CENTER_LNG: &str = "MAPVIEW_CENTER_LNG";
pub const ENV_VIEWPORT_WIDTH: &str = "MAPVIEW_VIEWPORT_WIDTH";
pub const ENV_VIEWPORT_HEIGHT: &str = "MAPVIEW_VIEWPORT_HEIGHT";
pub const ENV_ZOOM_STEP: &str = "MAPVIEW_ZOOM_STEP";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Starting level; the projection's minimum when absent.
    pub initial_level: Option<f64>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Level delta per zoom in/out step.
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            initial_level: None,
            center_lat: None,
            center_lng: None,
            viewport_width: 0,
            viewport_height: 0,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ViewConfig {
    /// Build typed view config from environment variables.
    ///
    /// Optional:
    /// - `MAPVIEW_INITIAL_LEVEL`: projection minimum when absent
    /// - `MAPVIEW_CENTER_LAT` / `MAPVIEW_CENTER_LNG`: both or neither
    /// - `MAPVIEW_VIEWPORT_WIDTH` / `MAPVIEW_VIEWPORT_HEIGHT`: default 0
    /// - `MAPVIEW_ZOOM_STEP`: default 1.0
    ///
    /// # Errors
    ///
    /// See [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Result<Self, ViewError> {
        Self::from_lookup(env_var)
    }

    /// Build config from any key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidConfig`] for values that do not parse, non-finite
    /// numbers, or a non-positive zoom step. [`ViewError::IncompleteCenter`]
    /// when only one of the center coordinates is given.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ViewError> {
        let initial_level = parse_finite(&lookup, ENV_INITIAL_LEVEL)?;
        let center_lat = parse_finite(&lookup, ENV_CENTER_LAT)?;
        let center_lng = parse_finite(&lookup, ENV_CENTER_LNG)?;
        if center_lat.is_some() != center_lng.is_some() {
            return Err(ViewError::IncompleteCenter { lat_var: ENV_CENTER_LAT, lng_var: ENV_CENTER_LNG });
        }
        let viewport_width = parse_var::<u32>(&lookup, ENV_VIEWPORT_WIDTH)?.unwrap_or(0);
        let viewport_height = parse_var::<u32>(&lookup, ENV_VIEWPORT_HEIGHT)?.unwrap_or(0);
        let zoom_step = match parse_finite(&lookup, ENV_ZOOM_STEP)? {
            Some(step) if step <= 0.0 => {
                return Err(ViewError::InvalidConfig { var: ENV_ZOOM_STEP.into(), value: step.to_string() });
            }
            Some(step) => step,
            None => DEFAULT_ZOOM_STEP,
        };

        Ok(Self { initial_level, center_lat, center_lng, viewport_width, viewport_height, zoom_step })
    }

    /// Zoom controller bounded by `projection`, stepping by `zoom_step`.
    #[must_use]
    pub fn zoom_controller(&self, projection: &dyn Projection) -> ZoomController {
        ZoomController::new(ZoomLimits::of(projection)).with_step(self.zoom_step)
    }
}

impl ViewState {
    /// Construct a view sized, zoomed, and centered per `config`.
    ///
    /// Without a configured center, the middle of the projected extent is
    /// placed under the viewport center.
    #[must_use]
    pub fn from_config(projection: Rc<dyn Projection>, config: &ViewConfig) -> Self {
        let mut state = Self::new(projection);
        state.set_viewport_size(config.viewport_width, config.viewport_height);
        if let Some(level) = config.initial_level {
            state.set_level(level, 0, 0);
        }
        match (config.center_lat, config.center_lng) {
            (Some(lat), Some(lng)) => state.set_center_lat_lng(lat, lng),
            _ => {
                let center = state.projection().projected_extent().center();
                let (x, y) = state.viewport_center();
                state.set_viewport_projected(center.x, center.y, x, y);
            }
        }
        debug!(
            level = state.level(),
            width = config.viewport_width,
            height = config.viewport_height,
            "view state configured"
        );
        state
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<T>, ViewError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ViewError::InvalidConfig { var: var.into(), value: raw }),
    }
}

fn parse_finite(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<f64>, ViewError> {
    match parse_var::<f64>(lookup, var)? {
        Some(value) if !value.is_finite() => Err(ViewError::InvalidConfig { var: var.into(), value: value.to_string() }),
        other => Ok(other),
    }
}
