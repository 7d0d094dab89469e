//! Cart Store

use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    cart::{
        CartError,
        lines::{CartLine, NewCartLine},
        observer::CartObserver,
        state::{CartChange, CartState},
    },
    ids::{ProductId, RestaurantId},
    snapshot::{PersistObserver, SnapshotStorage, restore_cart},
};

/// Owner of the cart state.
///
/// The four operations ([`add_item`](Self::add_item),
/// [`update_quantity`](Self::update_quantity),
/// [`remove_item`](Self::remove_item) and [`clear_cart`](Self::clear_cart))
/// are the only way to change the state. Each one runs to completion and
/// then notifies every attached observer.
pub struct CartStore {
    state: CartState,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartStore {
    /// Creates a store with an empty cart and no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Creates a store seeded with the given state.
    #[must_use]
    pub fn with_state(state: CartState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Restores the cart saved under `key` and persists every later change
    /// back to the same slot.
    ///
    /// A missing, unreadable or invalid snapshot yields an empty cart.
    pub fn open<S>(storage: S, key: impl Into<String>) -> Self
    where
        S: SnapshotStorage + 'static,
    {
        let key = key.into();
        let state = restore_cart(&storage, &key);

        info!(
            key = %key,
            lines = state.len(),
            items = state.item_count(),
            "cart restored"
        );

        let mut store = Self::with_state(state);
        store.subscribe(PersistObserver::new(storage, key));

        store
    }

    /// Attaches an observer.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Adds one unit of a product.
    ///
    /// Adding from a restaurant other than the one already in the cart
    /// replaces every line; the returned [`CartChange::RestaurantSwitched`]
    /// lets the caller tell the user.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] when the candidate is malformed. The
    /// cart is left untouched and observers are not notified.
    pub fn add_item(&mut self, candidate: NewCartLine) -> Result<CartChange, CartError> {
        let change = self.state.add_item(candidate)?;

        self.notify(&change);

        Ok(change)
    }

    /// Sets the quantity of a line; zero or less removes it.
    ///
    /// Quantities are stored as `u32`: anything above [`u32::MAX`] is stored
    /// as `u32::MAX`, and the returned [`CartChange::QuantityUpdated`] carries
    /// the quantity actually stored. An id with no line gives
    /// [`CartChange::Unchanged`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] when the new quantity would push the
    /// cart total past [`Decimal::MAX`]. The cart
    /// is left untouched and observers are not notified.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<CartChange, CartError> {
        let change = self.state.update_quantity(id, quantity)?;

        self.notify(&change);

        Ok(change)
    }

    /// Removes a line if present.
    pub fn remove_item(&mut self, id: &ProductId) -> CartChange {
        let change = self.state.remove_item(id);

        self.notify(&change);

        change
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) -> CartChange {
        let change = self.state.clear();

        self.notify(&change);

        change
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Sum of unit price times quantity.
    pub fn total(&self) -> Decimal {
        self.state.total()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Restaurant the cart currently belongs to.
    pub fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.state.restaurant_id()
    }

    fn notify(&mut self, change: &CartChange) {
        debug!(?change, items = self.state.item_count(), "cart changed");

        for observer in &mut self.observers {
            observer.on_change(change, &self.state);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
