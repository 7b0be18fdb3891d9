//! Redraw listener and the single slot a view state holds it in.
//!
//! The view state never owns its listener. It keeps a [`Weak`] reference, so
//! a listener that has been dropped by its owner simply stops receiving
//! notifications.

#[cfg(test)]
#[path = "listener_test.rs"]
mod listener_test;

use std::rc::Weak;

use crate::state::ViewState;

/// Receives "state changed" notifications.
///
/// No coordinates are carried; the listener re-reads what it needs from
/// `state`. `full_update` means cached display-space geometry is stale
/// (resolution changed). Otherwise the change was a pure translation.
pub trait ViewStateListener {
    fn on_state_updated(&self, state: &ViewState, full_update: bool);
}

/// Exactly one non-owning listener association.
#[derive(Default)]
pub struct ListenerSlot {
    listener: Option<Weak<dyn ViewStateListener>>,
}

impl ListenerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the attached listener, returning the previous one.
    pub fn attach(&mut self, listener: Weak<dyn ViewStateListener>) -> Option<Weak<dyn ViewStateListener>> {
        self.listener.replace(listener)
    }

    /// Remove the attached listener, returning it.
    pub fn detach(&mut self) -> Option<Weak<dyn ViewStateListener>> {
        self.listener.take()
    }

    /// Whether a listener is attached and still alive.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.listener.as_ref().is_some_and(|l| l.strong_count() > 0)
    }

    /// Deliver a notification. Returns `false` if nobody was listening.
    pub(crate) fn notify(&self, state: &ViewState, full_update: bool) -> bool {
        match self.listener.as_ref().and_then(Weak::upgrade) {
            Some(listener) => {
                listener.on_state_updated(state, full_update);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("attached", &self.listener.is_some())
            .field("live", &self.is_live())
            .finish()
    }
}
