//! Update batching.
//!
//! While a batch is open, notification requests are recorded instead of
//! delivered. When the outermost batch closes, at most one notification goes
//! out, flagged as a full update if any request inside asked for one.
//!
//! Batches are opened with [`ViewState::batch`] and closed when the returned
//! [`UpdateBatch`] guard is dropped, so the release cannot be forgotten or
//! skipped by an early return.

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;

use std::ops::{Deref, DerefMut};

use crate::state::ViewState;

/// Lock depth and the notification recorded while locked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingUpdate {
    depth: u32,
    pending: bool,
    pending_full: bool,
}

impl PendingUpdate {
    /// Number of open batches.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.depth > 0
    }

    /// Whether a notification has been recorded in the current batch.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn lock(&mut self) {
        self.depth += 1;
        if self.depth == 1 {
            self.pending = false;
            self.pending_full = false;
        }
    }

    /// Close one level. Returns the notification to deliver when the
    /// outermost batch closes with something recorded.
    pub(crate) fn unlock(&mut self) -> Option<bool> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 && self.pending {
            self.pending = false;
            let full = std::mem::take(&mut self.pending_full);
            return Some(full);
        }
        None
    }

    /// Record a request. Returns `true` if it was deferred.
    pub(crate) fn defer(&mut self, full_update: bool) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.pending = true;
        self.pending_full |= full_update;
        true
    }
}

/// Scoped batch over a [`ViewState`].
///
/// Derefs to the state, so mutators (and nested batches) are called through
/// the guard. Dropping it closes the batch.
pub struct UpdateBatch<'a> {
    state: &'a mut ViewState,
}

impl<'a> UpdateBatch<'a> {
    pub(crate) fn open(state: &'a mut ViewState) -> Self {
        state.lock();
        Self { state }
    }
}

impl Deref for UpdateBatch<'_> {
    type Target = ViewState;

    fn deref(&self) -> &ViewState {
        self.state
    }
}

impl DerefMut for UpdateBatch<'_> {
    fn deref_mut(&mut self) -> &mut ViewState {
        self.state
    }
}

impl Drop for UpdateBatch<'_> {
    fn drop(&mut self) {
        self.state.unlock();
    }
}
