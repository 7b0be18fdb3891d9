#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Point;
use crate::testing::{attach_recorder, linear_view};

// =============================================================
// PendingUpdate
// =============================================================

#[test]
fn pending_default_is_unlocked_and_clear() {
    let p = PendingUpdate::default();
    assert_eq!(p.depth(), 0);
    assert!(!p.is_locked());
    assert!(!p.is_pending());
}

#[test]
fn defer_outside_lock_is_refused() {
    let mut p = PendingUpdate::default();
    assert!(!p.defer(true));
    assert!(!p.is_pending());
}

#[test]
fn unlock_delivers_or_of_requests() {
    let mut p = PendingUpdate::default();
    p.lock();
    assert!(p.defer(false));
    assert!(p.defer(true));
    assert!(p.defer(false));
    assert_eq!(p.unlock(), Some(true));
    assert!(!p.is_pending());
}

#[test]
fn unlock_without_requests_delivers_nothing() {
    let mut p = PendingUpdate::default();
    p.lock();
    assert_eq!(p.unlock(), None);
}

#[test]
fn nested_unlock_waits_for_outermost() {
    let mut p = PendingUpdate::default();
    p.lock();
    p.lock();
    assert!(p.defer(false));
    assert_eq!(p.unlock(), None);
    assert!(p.is_locked());
    assert_eq!(p.unlock(), Some(false));
    assert!(!p.is_locked());
}

#[test]
fn entering_depth_one_resets_flags() {
    let mut p = PendingUpdate::default();
    p.lock();
    p.defer(true);
    p.lock();
    assert!(p.is_pending());
    assert_eq!(p.unlock(), None);
    assert_eq!(p.unlock(), Some(true));
    p.lock();
    assert!(!p.is_pending());
    assert_eq!(p.unlock(), None);
}

#[test]
fn unlock_at_zero_saturates() {
    let mut p = PendingUpdate::default();
    assert_eq!(p.unlock(), None);
    assert_eq!(p.depth(), 0);
}

// =============================================================
// UpdateBatch
// =============================================================

#[test]
fn two_resolution_changes_yield_one_full_update() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        batch.set_resolution(0.5, 0, 0);
        batch.set_resolution(0.25, 0, 0);
        assert_eq!(recorder.count(), 0);
    }
    assert_eq!(recorder.full_flags(), vec![true]);
}

#[test]
fn pans_in_batch_yield_one_translation_update() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        batch.move_viewport(1.0, 0.0);
        batch.set_viewport_origin(5.0, 5.0);
        batch.set_viewport_projected(10.0, 10.0, 0, 0);
    }
    assert_eq!(recorder.full_flags(), vec![false]);
}

#[test]
fn mixed_batch_reports_full_update() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        batch.move_viewport(3.0, 0.0);
        batch.set_level(1.0, 20, 20);
        batch.move_viewport(0.0, -3.0);
    }
    assert_eq!(recorder.full_flags(), vec![true]);
}

#[test]
fn empty_batch_is_silent() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    drop(state.batch());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn batch_of_noops_is_silent() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        let origin = batch.viewport_origin();
        batch.set_viewport_origin(origin.x, origin.y);
        batch.set_resolution(1.0, 0, 0);
        batch.set_viewport_size(800, 600);
    }
    assert_eq!(recorder.count(), 0);
}

#[test]
fn nested_batches_deliver_after_outer_drop() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut outer = state.batch();
        {
            let mut inner = outer.batch();
            inner.move_viewport(1.0, 1.0);
            assert_eq!(inner.pending_update().depth(), 2);
        }
        assert_eq!(recorder.count(), 0);
        assert_eq!(outer.pending_update().depth(), 1);
        outer.move_viewport(1.0, 1.0);
    }
    assert_eq!(recorder.full_flags(), vec![false]);
    assert_eq!(state.pending_update().depth(), 0);
}

#[test]
fn listener_sees_final_state_only() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        batch.set_viewport_origin(1.0, 1.0);
        batch.set_viewport_origin(2.0, 2.0);
        batch.set_viewport_origin(3.0, 3.0);
    }
    let seen = recorder.last().expect("one notification");
    assert_eq!(seen.origin, Point::new(3.0, 3.0));
}

fn pan_until(state: &mut ViewState, limit: f64) -> u32 {
    let mut batch = state.batch();
    let mut steps = 0;
    loop {
        if batch.viewport_origin().x >= limit {
            return steps;
        }
        batch.move_viewport(10.0, 0.0);
        steps += 1;
    }
}

#[test]
fn early_return_releases_batch() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    let steps = pan_until(&mut state, 530.0);
    assert_eq!(steps, 3);
    assert!(!state.pending_update().is_locked());
    assert_eq!(recorder.full_flags(), vec![false]);
}

#[test]
fn batches_are_independent() {
    let mut state = linear_view(false, false);
    let recorder = attach_recorder(&mut state);
    {
        let mut batch = state.batch();
        batch.set_level(1.0, 0, 0);
    }
    {
        let mut batch = state.batch();
        batch.move_viewport(1.0, 0.0);
    }
    assert_eq!(recorder.full_flags(), vec![true, false]);
}
