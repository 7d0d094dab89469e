//! Persistence observer

use tracing::{trace, warn};

use crate::{
    cart::{CartChange, CartObserver, CartState},
    snapshot::{save_cart, storage::SnapshotStorage},
};

/// Writes the full cart to storage after every operation.
///
/// A failed write is logged and dropped; the in-memory cart stays
/// authoritative and the next operation tries again.
#[derive(Debug)]
pub struct PersistObserver<S> {
    storage: S,
    key: String,
}

impl<S: SnapshotStorage> PersistObserver<S> {
    /// Persists into the slot named `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot the cart is written to.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: SnapshotStorage> CartObserver for PersistObserver<S> {
    fn on_change(&mut self, change: &CartChange, state: &CartState) {
        match save_cart(&self.storage, &self.key, state) {
            Ok(()) => trace!(key = %self.key, ?change, "cart snapshot written"),
            Err(error) => warn!(
                key = %self.key,
                error = %error,
                "failed to persist cart snapshot"
            ),
        }
    }
}
