//! Map projections: the strategy a [`ViewState`](crate::state::ViewState)
//! consults to move between global and projected coordinates.
//!
//! A projection is stateless. It maps global coordinates (whatever its
//! forward functions accept, usually longitude/latitude) into projected units,
//! converts between zoom levels and resolutions, and declares which axes
//! run opposite to screen direction.
//!
//! No method validates its input. Coordinates outside the projection's
//! domain produce whatever the math yields, including infinities and NaN.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use std::f64::consts::PI;

use crate::consts::{EARTH_RADIUS_M, TILE_SIZE_PX, WEB_MERCATOR_MAX_LEVEL, WEB_MERCATOR_MIN_LEVEL};
use crate::geom::Bounds;

/// Capability set consumed by the view state.
pub trait Projection {
    /// Coarsest zoom level the map source provides.
    fn min_level(&self) -> f64;

    /// Finest zoom level the map source provides.
    fn max_level(&self) -> f64;

    /// Projected units per display pixel at `level`.
    fn from_level(&self, level: f64) -> f64;

    /// Inverse of [`from_level`](Self::from_level).
    fn to_level(&self, resolution: f64) -> f64;

    fn forward_x(&self, global_x: f64) -> f64;
    fn forward_y(&self, global_y: f64) -> f64;
    fn inverse_x(&self, projected_x: f64) -> f64;
    fn inverse_y(&self, projected_y: f64) -> f64;

    /// Whether increasing projected X runs toward decreasing display X.
    fn is_x_axis_inverted(&self) -> bool;

    /// Whether increasing projected Y runs toward decreasing display Y.
    fn is_y_axis_inverted(&self) -> bool;

    /// Bounding box of valid projected coordinates.
    fn projected_extent(&self) -> Bounds;
}

/// Spherical (EPSG:3857) mercator with 256-pixel tiles.
///
/// Global X is longitude and global Y is latitude, both in degrees.
/// Projected units are meters. North is up, so the Y axis is inverted.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl WebMercator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Length of the equator in projected units.
    fn circumference() -> f64 {
        2.0 * PI * EARTH_RADIUS_M
    }
}

impl Projection for WebMercator {
    fn min_level(&self) -> f64 {
        WEB_MERCATOR_MIN_LEVEL
    }

    fn max_level(&self) -> f64 {
        WEB_MERCATOR_MAX_LEVEL
    }

    fn from_level(&self, level: f64) -> f64 {
        Self::circumference() / (TILE_SIZE_PX * level.exp2())
    }

    fn to_level(&self, resolution: f64) -> f64 {
        (Self::circumference() / (TILE_SIZE_PX * resolution)).log2()
    }

    fn forward_x(&self, lng: f64) -> f64 {
        EARTH_RADIUS_M * lng.to_radians()
    }

    fn forward_y(&self, lat: f64) -> f64 {
        EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln()
    }

    fn inverse_x(&self, projected_x: f64) -> f64 {
        (projected_x / EARTH_RADIUS_M).to_degrees()
    }

    fn inverse_y(&self, projected_y: f64) -> f64 {
        (2.0 * (projected_y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees()
    }

    fn is_x_axis_inverted(&self) -> bool {
        false
    }

    fn is_y_axis_inverted(&self) -> bool {
        true
    }

    fn projected_extent(&self) -> Bounds {
        let half = PI * EARTH_RADIUS_M;
        Bounds::new(-half, -half, half, half)
    }
}

/// Identity projection over a fixed extent.
///
/// Suited to non-geographic surfaces such as floor plans or large images,
/// where global and projected coordinates coincide. Resolution halves with
/// each level: `from_level(l) = base_resolution / 2^l`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearProjection {
    extent: Bounds,
    base_resolution: f64,
    min_level: f64,
    max_level: f64,
    x_inverted: bool,
    y_inverted: bool,
}

impl LinearProjection {
    /// Non-inverted projection over `extent` with base resolution 1 and levels 0..=20.
    #[must_use]
    pub fn new(extent: Bounds) -> Self {
        Self { extent, base_resolution: 1.0, min_level: 0.0, max_level: 20.0, x_inverted: false, y_inverted: false }
    }

    #[must_use]
    pub fn with_axis_inversion(mut self, x_inverted: bool, y_inverted: bool) -> Self {
        self.x_inverted = x_inverted;
        self.y_inverted = y_inverted;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, min_level: f64, max_level: f64) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn with_base_resolution(mut self, base_resolution: f64) -> Self {
        self.base_resolution = base_resolution;
        self
    }
}

impl Projection for LinearProjection {
    fn min_level(&self) -> f64 {
        self.min_level
    }

    fn max_level(&self) -> f64 {
        self.max_level
    }

    fn from_level(&self, level: f64) -> f64 {
        self.base_resolution / level.exp2()
    }

    fn to_level(&self, resolution: f64) -> f64 {
        (self.base_resolution / resolution).log2()
    }

    fn forward_x(&self, global_x: f64) -> f64 {
        global_x
    }

    fn forward_y(&self, global_y: f64) -> f64 {
        global_y
    }

    fn inverse_x(&self, projected_x: f64) -> f64 {
        projected_x
    }

    fn inverse_y(&self, projected_y: f64) -> f64 {
        projected_y
    }

    fn is_x_axis_inverted(&self) -> bool {
        self.x_inverted
    }

    fn is_y_axis_inverted(&self) -> bool {
        self.y_inverted
    }

    fn projected_extent(&self) -> Bounds {
        self.extent
    }
}
