//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::geom::{Bounds, Point};
use crate::listener::ViewStateListener;
use crate::projection::LinearProjection;
use crate::state::ViewState;

pub const EPSILON: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// What a listener observed at notification time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seen {
    pub full_update: bool,
    pub resolution: f64,
    pub origin: Point,
}

/// Listener that records every notification.
#[derive(Default)]
pub struct Recorder {
    seen: RefCell<Vec<Seen>>,
}

impl Recorder {
    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn full_flags(&self) -> Vec<bool> {
        self.seen.borrow().iter().map(|s| s.full_update).collect()
    }

    pub fn last(&self) -> Option<Seen> {
        self.seen.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl ViewStateListener for Recorder {
    fn on_state_updated(&self, state: &ViewState, full_update: bool) {
        self.seen.borrow_mut().push(Seen {
            full_update,
            resolution: state.resolution(),
            origin: state.viewport_origin(),
        });
    }
}

pub fn weak_listener(recorder: &Rc<Recorder>) -> Weak<dyn ViewStateListener> {
    let listener: Rc<dyn ViewStateListener> = recorder.clone();
    Rc::downgrade(&listener)
}

/// Attach a fresh recorder to `state`.
pub fn attach_recorder(state: &mut ViewState) -> Rc<Recorder> {
    let recorder = Rc::new(Recorder::default());
    state.attach_listener(weak_listener(&recorder));
    recorder
}

/// 1000×1000 linear surface, base resolution 1.
pub fn linear_view(x_inverted: bool, y_inverted: bool) -> ViewState {
    let projection =
        LinearProjection::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0)).with_axis_inversion(x_inverted, y_inverted);
    ViewState::new(Rc::new(projection))
}
