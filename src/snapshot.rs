//! Serializable view snapshots for persisting and restoring where a map was looking.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::ViewState;

/// The physical fields of a [`ViewState`]. The projection is not included;
/// a snapshot is only meaningful against the projection it was taken with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub resolution: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl ViewState {
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let origin = self.viewport_origin();
        ViewSnapshot {
            resolution: self.resolution(),
            origin_x: origin.x,
            origin_y: origin.y,
            viewport_width: self.viewport_width(),
            viewport_height: self.viewport_height(),
        }
    }

    /// Apply every field of `snapshot` as one batch.
    ///
    /// Notifies once: a full update if the resolution changed, a translation
    /// if only the origin changed, nothing if the view already matched.
    pub fn restore(&mut self, snapshot: &ViewSnapshot) {
        let mut batch = self.batch();
        batch.set_viewport_size(snapshot.viewport_width, snapshot.viewport_height);
        if batch.replace_resolution(snapshot.resolution) {
            batch.updated(true);
        }
        batch.set_viewport_origin(snapshot.origin_x, snapshot.origin_y);
        debug!(
            resolution = snapshot.resolution,
            origin_x = snapshot.origin_x,
            origin_y = snapshot.origin_y,
            "view state restored"
        );
    }
}
