//! Shared numeric constants for the mapview crate.

// ── Web mercator ────────────────────────────────────────────────

/// Sphere radius in meters used by spherical (EPSG:3857) mercator.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Square tile edge in pixels; level 0 covers the world in one tile.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Coarsest web-mercator zoom level.
pub const WEB_MERCATOR_MIN_LEVEL: f64 = 0.0;

/// Finest web-mercator zoom level.
pub const WEB_MERCATOR_MAX_LEVEL: f64 = 18.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Level delta applied by one `zoom_in` / `zoom_out` step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.0;
