//! Foodie subcommands

use std::io::{self, Write};

use clap::Subcommand;
use foodie_cart::{
    cart::CartError, catalog::CatalogError, checkout::CheckoutError, context::AppContext,
    favorites::FavoritesError, receipt::ReceiptError,
};
use thiserror::Error;

mod cart;
mod checkout;
mod favorites;
mod menu;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// The cart rejected the change.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The order could not be placed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A favorites operation failed.
    #[error(transparent)]
    Favorites(#[from] FavoritesError),

    /// The receipt could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Browse restaurants and menus
    Menu(menu::MenuCommand),

    /// Inspect and change the cart
    Cart(cart::CartCommand),

    /// Place the order in the cart
    Checkout(checkout::CheckoutArgs),

    /// Manage favorite restaurants and menu items
    Favorites(favorites::FavoritesCommand),
}

impl Command {
    pub(crate) fn run(
        self,
        context: &mut AppContext,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match self {
            Self::Menu(command) => menu::run(command, context, out),
            Self::Cart(command) => cart::run(command, context, out),
            Self::Checkout(args) => checkout::run(args, context, out),
            Self::Favorites(command) => favorites::run(command, context, out),
        }
    }
}
