//! The map view state: resolution, viewport origin, viewport size.
//!
//! Coordinate spaces, from screen inwards:
//!
//! - **viewport**: display coordinates offset by the viewport origin. Pixel
//!   (0, 0) is the top-left of the visible area.
//! - **display**: pixel units on a virtual canvas the size of the whole map at
//!   the current resolution. Listeners that cache geometry should cache
//!   display coordinates; they only go stale on resolution changes, not on
//!   pans. Axis inversion is already folded in, so display Y always grows
//!   downwards.
//! - **projected**: unscaled units of the projection.
//! - **global**: whatever the projection's forward functions accept.
//!
//! Unadorned `(x, y)` pixel arguments are viewport coordinates.
//!
//! Nothing here validates input. Resolution is not clamped to the
//! projection's level range and global coordinates are not checked against
//! its domain; see [`crate::zoom`] for an opt-in clamping layer.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::batch::{PendingUpdate, UpdateBatch};
use crate::geom::{Bounds, Point};
use crate::listener::{ListenerSlot, ViewStateListener};
use crate::projection::Projection;

/// Where the map is looking and at what scale.
pub struct ViewState {
    projection: Rc<dyn Projection>,
    /// Projected units per display pixel.
    resolution: f64,
    /// Display X of the viewport's left edge.
    viewport_origin_x: f64,
    /// Display Y of the viewport's top edge.
    viewport_origin_y: f64,
    viewport_width: u32,
    viewport_height: u32,
    update: PendingUpdate,
    listener: ListenerSlot,
}

impl ViewState {
    /// Create a view at the projection's minimum level, with the center of
    /// the projected extent under viewport pixel (0, 0).
    #[must_use]
    pub fn new(projection: Rc<dyn Projection>) -> Self {
        let resolution = projection.from_level(projection.min_level());
        let center = projection.projected_extent().center();
        let mut state = Self {
            projection,
            resolution,
            viewport_origin_x: 0.0,
            viewport_origin_y: 0.0,
            viewport_width: 0,
            viewport_height: 0,
            update: PendingUpdate::default(),
            listener: ListenerSlot::new(),
        };
        state.set_viewport_projected(center.x, center.y, 0, 0);
        debug!(
            resolution,
            origin_x = state.viewport_origin_x,
            origin_y = state.viewport_origin_y,
            "view state created"
        );
        state
    }

    /// Like [`new`](Self::new), with a listener attached from the start.
    #[must_use]
    pub fn with_listener(projection: Rc<dyn Projection>, listener: Weak<dyn ViewStateListener>) -> Self {
        let mut state = Self::new(projection);
        state.listener.attach(listener);
        state
    }

    // --- Listener ---

    /// Attach `listener`, returning whatever was attached before.
    pub fn attach_listener(&mut self, listener: Weak<dyn ViewStateListener>) -> Option<Weak<dyn ViewStateListener>> {
        self.listener.attach(listener)
    }

    /// Detach the current listener, returning it.
    pub fn detach_listener(&mut self) -> Option<Weak<dyn ViewStateListener>> {
        self.listener.detach()
    }

    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_live()
    }

    // --- Batching ---

    /// Open an update batch. Notifications raised through the guard are
    /// coalesced and delivered once, when the outermost guard drops.
    pub fn batch(&mut self) -> UpdateBatch<'_> {
        UpdateBatch::open(self)
    }

    /// Current lock depth and pending notification.
    #[must_use]
    pub fn pending_update(&self) -> PendingUpdate {
        self.update
    }

    pub(crate) fn lock(&mut self) {
        self.update.lock();
    }

    pub(crate) fn unlock(&mut self) {
        if let Some(full_update) = self.update.unlock() {
            self.deliver(full_update);
        }
    }

    pub(crate) fn updated(&mut self, full_update: bool) {
        if self.update.defer(full_update) {
            trace!(full_update, depth = self.update.depth(), "view state update deferred");
            return;
        }
        self.deliver(full_update);
    }

    fn deliver(&self, full_update: bool) {
        if self.listener.notify(self, full_update) {
            trace!(full_update, "view state update delivered");
        } else {
            trace!(full_update, "view state update dropped; no live listener");
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn projection(&self) -> &Rc<dyn Projection> {
        &self.projection
    }

    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Current (possibly fractional) zoom level.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.projection.to_level(self.resolution)
    }

    /// Display coordinate of viewport pixel (0, 0).
    #[must_use]
    pub fn viewport_origin(&self) -> Point {
        Point::new(self.viewport_origin_x, self.viewport_origin_y)
    }

    #[must_use]
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Viewport pixel at the geometric center, using integer division.
    #[must_use]
    pub fn viewport_center(&self) -> (i32, i32) {
        let half = |n: u32| i32::try_from(n / 2).unwrap_or(i32::MAX);
        (half(self.viewport_width), half(self.viewport_height))
    }

    // --- Point conversions ---

    #[must_use]
    pub fn viewport_to_display(&self, viewport: Point) -> Point {
        Point::new(self.viewport_origin_x + viewport.x, self.viewport_origin_y + viewport.y)
    }

    #[must_use]
    pub fn display_to_viewport(&self, display: Point) -> Point {
        Point::new(display.x - self.viewport_origin_x, display.y - self.viewport_origin_y)
    }

    /// Scale by resolution, then flip inverted axes against the extent's max edge.
    #[must_use]
    pub fn display_to_projected(&self, display: Point) -> Point {
        // Rotation would apply here, before scaling.
        let mut x = display.x * self.resolution;
        let mut y = display.y * self.resolution;
        if self.projection.is_x_axis_inverted() {
            x = self.projection.projected_extent().max_x - x;
        }
        if self.projection.is_y_axis_inverted() {
            // Distance in projected units below max_y.
            y = self.projection.projected_extent().max_y - y;
        }
        Point::new(x, y)
    }

    #[must_use]
    pub fn projected_to_display(&self, projected: Point) -> Point {
        Point::new(self.projected_to_display_x(projected.x), self.projected_to_display_y(projected.y))
    }

    #[must_use]
    pub fn projected_to_display_x(&self, projected_x: f64) -> f64 {
        let x = if self.projection.is_x_axis_inverted() {
            self.projection.projected_extent().max_x - projected_x
        } else {
            projected_x
        };
        x / self.resolution
    }

    #[must_use]
    pub fn projected_to_display_y(&self, projected_y: f64) -> f64 {
        let y = if self.projection.is_y_axis_inverted() {
            self.projection.projected_extent().max_y - projected_y
        } else {
            projected_y
        };
        y / self.resolution
    }

    #[must_use]
    pub fn viewport_to_projected(&self, viewport: Point) -> Point {
        self.display_to_projected(self.viewport_to_display(viewport))
    }

    #[must_use]
    pub fn projected_to_viewport(&self, projected: Point) -> Point {
        self.display_to_viewport(self.projected_to_display(projected))
    }

    #[must_use]
    pub fn viewport_to_global(&self, viewport: Point) -> Point {
        let projected = self.viewport_to_projected(viewport);
        Point::new(self.projection.inverse_x(projected.x), self.projection.inverse_y(projected.y))
    }

    #[must_use]
    pub fn global_to_projected(&self, global: Point) -> Point {
        Point::new(self.projection.forward_x(global.x), self.projection.forward_y(global.y))
    }

    #[must_use]
    pub fn global_to_viewport(&self, global: Point) -> Point {
        self.projected_to_viewport(self.global_to_projected(global))
    }

    // --- Pixel-anchored reads ---

    #[must_use]
    pub fn viewport_display(&self, x: i32, y: i32) -> Point {
        self.viewport_to_display(pixel(x, y))
    }

    /// Projected coordinate under viewport pixel (x, y).
    #[must_use]
    pub fn viewport_projected(&self, x: i32, y: i32) -> Point {
        self.viewport_to_projected(pixel(x, y))
    }

    /// Global coordinate under viewport pixel (x, y).
    #[must_use]
    pub fn viewport_global(&self, x: i32, y: i32) -> Point {
        self.viewport_to_global(pixel(x, y))
    }

    #[must_use]
    pub fn viewport_latitude(&self, x: i32, y: i32) -> f64 {
        self.viewport_global(x, y).y
    }

    #[must_use]
    pub fn viewport_longitude(&self, x: i32, y: i32) -> f64 {
        self.viewport_global(x, y).x
    }

    /// Global coordinate under the viewport center.
    #[must_use]
    pub fn center_global(&self) -> Point {
        let (x, y) = self.viewport_center();
        self.viewport_global(x, y)
    }

    /// Projected area covered by the viewport rectangle.
    #[must_use]
    pub fn visible_projected_bounds(&self) -> Bounds {
        let top_left = self.viewport_to_projected(Point::new(0.0, 0.0));
        let bottom_right =
            self.viewport_to_projected(Point::new(f64::from(self.viewport_width), f64::from(self.viewport_height)));
        Bounds::from_corners(top_left, bottom_right)
    }

    // --- Mutators ---

    /// Record the visible pixel extent. Never notifies; call a positioning
    /// mutator afterwards to recenter.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Move the viewport origin to an absolute display coordinate.
    #[allow(clippy::float_cmp)]
    pub fn set_viewport_origin(&mut self, x: f64, y: f64) {
        if x == self.viewport_origin_x && y == self.viewport_origin_y {
            return;
        }
        self.viewport_origin_x = x;
        self.viewport_origin_y = y;
        self.updated(false);
    }

    /// Translate the viewport origin. Notifies even for a zero delta.
    pub fn move_viewport(&mut self, delta_x: f64, delta_y: f64) {
        self.viewport_origin_x += delta_x;
        self.viewport_origin_y += delta_y;
        self.updated(false);
    }

    /// Change resolution, keeping the projected point under viewport pixel
    /// (x, y) in place. Raises a single full update.
    #[allow(clippy::float_cmp)]
    pub fn set_resolution(&mut self, resolution: f64, x: i32, y: i32) {
        if resolution == self.resolution {
            return;
        }
        let mut batch = self.batch();
        let anchor = batch.viewport_projected(x, y);
        debug!(from = batch.resolution, to = resolution, x, y, "resolution changed");
        batch.resolution = resolution;
        batch.set_viewport_projected(anchor.x, anchor.y, x, y);
        batch.updated(true);
    }

    /// Change zoom level, anchored at viewport pixel (x, y).
    pub fn set_level(&mut self, level: f64, x: i32, y: i32) {
        let resolution = self.projection.from_level(level);
        self.set_resolution(resolution, x, y);
    }

    /// Position the viewport so `(projected_x, projected_y)` lies under
    /// viewport pixel (x, y).
    pub fn set_viewport_projected(&mut self, projected_x: f64, projected_y: f64, x: i32, y: i32) {
        let origin_x = self.projected_to_display_x(projected_x) - f64::from(x);
        let origin_y = self.projected_to_display_y(projected_y) - f64::from(y);
        self.set_viewport_origin(origin_x, origin_y);
    }

    pub fn set_viewport_global(&mut self, global_x: f64, global_y: f64, x: i32, y: i32) {
        let projected = self.global_to_projected(Point::new(global_x, global_y));
        self.set_viewport_projected(projected.x, projected.y, x, y);
    }

    /// Same as `set_viewport_global(lng, lat, x, y)`.
    pub fn set_viewport_lat_lng(&mut self, lat: f64, lng: f64, x: i32, y: i32) {
        self.set_viewport_global(lng, lat, x, y);
    }

    /// Put a global coordinate under the viewport center.
    pub fn set_center_global(&mut self, global_x: f64, global_y: f64) {
        let (x, y) = self.viewport_center();
        self.set_viewport_global(global_x, global_y, x, y);
    }

    pub fn set_center_lat_lng(&mut self, lat: f64, lng: f64) {
        let (x, y) = self.viewport_center();
        self.set_viewport_global(lng, lat, x, y);
    }

    /// Replace the resolution without re-anchoring the origin.
    /// Returns whether it changed; the caller raises the notification.
    #[allow(clippy::float_cmp)]
    pub(crate) fn replace_resolution(&mut self, resolution: f64) -> bool {
        if resolution == self.resolution {
            return false;
        }
        self.resolution = resolution;
        true
    }
}

impl std::fmt::Debug for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewState")
            .field("resolution", &self.resolution)
            .field("viewport_origin_x", &self.viewport_origin_x)
            .field("viewport_origin_y", &self.viewport_origin_y)
            .field("viewport_width", &self.viewport_width)
            .field("viewport_height", &self.viewport_height)
            .field("update", &self.update)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

fn pixel(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}
