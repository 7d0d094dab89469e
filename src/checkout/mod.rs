//! Checkout
//!
//! Orders are simulated: a confirmed order is priced, stamped and the cart is
//! emptied, but no payment is taken and nothing leaves the process.

use jiff::Timestamp;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    cart::{CartLine, CartStore},
    ids::{RestaurantId, UserId},
    pricing::{OrderSummary, PricingConfig},
};

mod details;

pub use details::{DeliveryDetails, Field, FieldError, FieldErrors};

/// Reasons an order cannot be placed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Only signed-in users can order.
    #[error("sign in to place an order")]
    NotSignedIn,

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// The delivery form has errors.
    #[error("invalid delivery details: {0}")]
    InvalidDetails(FieldErrors),
}

/// A placed order.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    /// Order id.
    pub order_id: Uuid,

    /// When the order was placed.
    pub placed_at: Timestamp,

    /// Who placed it.
    pub user: UserId,

    /// Restaurant the order goes to.
    pub restaurant_id: RestaurantId,

    /// Restaurant display name.
    pub restaurant_name: String,

    /// Ordered lines, as they were in the cart.
    pub lines: Vec<CartLine>,

    /// Amounts charged.
    pub summary: OrderSummary,

    /// Delivery details.
    pub details: DeliveryDetails,
}

/// Places the order held in the cart.
///
/// On success the cart is cleared through [`CartStore::clear_cart`], so
/// observers (and the persisted snapshot) see it empty.
///
/// # Errors
///
/// - [`CheckoutError::NotSignedIn`]: no user is signed in.
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::InvalidDetails`]: the delivery details fail validation.
pub fn place_order(
    store: &mut CartStore,
    user: Option<&UserId>,
    details: DeliveryDetails,
    pricing: &PricingConfig,
) -> Result<OrderConfirmation, CheckoutError> {
    let user = user.ok_or(CheckoutError::NotSignedIn)?;

    let Some(first) = store.lines().first() else {
        return Err(CheckoutError::EmptyCart);
    };

    let restaurant_id = first.restaurant_id().clone();
    let restaurant_name = first.restaurant_name().to_string();

    details.validate().map_err(CheckoutError::InvalidDetails)?;

    let confirmation = OrderConfirmation {
        order_id: Uuid::now_v7(),
        placed_at: Timestamp::now(),
        user: user.clone(),
        restaurant_id,
        restaurant_name,
        lines: store.lines().to_vec(),
        summary: OrderSummary::for_cart(store.state(), pricing),
        details,
    };

    store.clear_cart();

    info!(
        order_id = %confirmation.order_id,
        user = %confirmation.user,
        restaurant = %confirmation.restaurant_id,
        total = %confirmation.summary.total(),
        "order placed"
    );

    Ok(confirmation)
}
