//! Foodie Cart
//!
//! Shopping cart for a food-ordering app. A cart holds lines from exactly one
//! restaurant; adding an item from another restaurant starts a new cart.
//! Every change is written to a snapshot so the cart survives restarts.
//!
//! Around the cart sit the read-only [`catalog`], [`pricing`] of the order
//! summary, a simulated [`checkout`] and per-user [`favorites`].

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod favorites;
pub mod ids;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod snapshot;
