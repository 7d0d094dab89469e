//! Cart Observer

use crate::cart::state::{CartChange, CartState};

/// Observer notified after every cart operation.
///
/// Observers are attached at the store's mutation boundary. They see the
/// change that was applied and the resulting state, read-only, so anything
/// that follows the cart (persistence, a header badge, a notice when the
/// cart switched restaurants) lives outside the operation bodies.
///
/// Any `FnMut(&CartChange, &CartState)` closure is an observer.
pub trait CartObserver {
    /// Called once per operation, after the state has been updated.
    ///
    /// No-op operations are reported too, as [`CartChange::Unchanged`].
    fn on_change(&mut self, change: &CartChange, state: &CartState);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartChange, &CartState),
{
    fn on_change(&mut self, change: &CartChange, state: &CartState) {
        self(change, state);
    }
}

/// Observer that ignores every change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_change(&mut self, _change: &CartChange, _state: &CartState) {}
}
