//! Cart
//!
//! The single-restaurant order draft. [`CartStore`] is the only way to mutate
//! a [`CartState`]; every mutation reports a [`CartChange`] to the attached
//! [`CartObserver`]s.

use thiserror::Error;

use crate::ids::{ProductId, RestaurantId};

pub mod lines;
pub mod observer;
pub mod state;
pub mod store;

pub use lines::{CartLine, NewCartLine};
pub use observer::{CartObserver, NoopObserver};
pub use state::{CartChange, CartState};
pub use store::CartStore;

/// Errors raised by cart operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The candidate passed to `add_item` is malformed, or the change would
    /// push the cart total past what a price can hold.
    #[error("invalid cart item {id:?}: {reason}")]
    InvalidItem {
        /// Product id of the rejected candidate.
        id: String,

        /// What was wrong with it.
        reason: &'static str,
    },
}

/// A cart state that breaks one of the cart invariants.
///
/// Only reachable through deserialized state; the store never produces one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Lines belong to more than one restaurant.
    #[error("line {line} belongs to restaurant {found}, cart belongs to {expected}")]
    MixedRestaurants {
        /// Offending line.
        line: ProductId,

        /// Restaurant of the first line.
        expected: RestaurantId,

        /// Restaurant of the offending line.
        found: RestaurantId,
    },

    /// The same product appears on more than one line.
    #[error("product {0} appears on more than one line")]
    DuplicateLine(ProductId),

    /// A line has a quantity of zero.
    #[error("line {0} has a zero quantity")]
    ZeroQuantity(ProductId),

    /// A line has a negative unit price.
    #[error("line {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// The cart total does not fit in a price.
    #[error("cart total overflows")]
    TotalOverflow,
}
