use std::io::Write;

use clap::{Args, Subcommand};
use foodie_cart::{
    cart::CartChange, context::AppContext, ids::ProductId, pricing::OrderSummary, receipt,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and order summary
    Show,

    /// Add one unit of a menu item
    Add {
        /// Menu item id
        item: String,
    },

    /// Set a line's quantity; zero or less removes it
    Update {
        /// Menu item id
        item: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove {
        /// Menu item id
        item: String,
    },

    /// Empty the cart
    Clear,
}

pub(crate) fn run(
    command: CartCommand,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let change = match command.command {
        CartSubcommand::Show => {
            let summary = OrderSummary::for_cart(context.cart.state(), &context.pricing);

            receipt::write_cart(out, context.cart.state(), &summary)?;

            return Ok(());
        }
        CartSubcommand::Add { item } => {
            let candidate = context.catalog.cart_candidate(&ProductId::from(item))?;

            context.cart.add_item(candidate)?
        }
        CartSubcommand::Update { item, quantity } => {
            context.cart.update_quantity(&ProductId::from(item), quantity)?
        }
        CartSubcommand::Remove { item } => context.cart.remove_item(&ProductId::from(item)),
        CartSubcommand::Clear => context.cart.clear_cart(),
    };

    describe(&change, context, out)?;

    let count = context.cart.item_count();
    writeln!(out, "{count} item(s) in your cart")?;

    Ok(())
}

fn describe(
    change: &CartChange,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let name = |id: &ProductId| {
        context
            .cart
            .state()
            .line(id)
            .map_or_else(|| id.to_string(), |line| line.name().to_string())
    };

    match change {
        CartChange::Added(id) => writeln!(out, "Added {} to your cart", name(id))?,
        CartChange::Incremented { id, quantity } => {
            writeln!(out, "Added another {} ({quantity} in cart)", name(id))?;
        }
        CartChange::RestaurantSwitched {
            previous,
            discarded,
            id,
        } => {
            let restaurant = context.cart.state().restaurant_name().unwrap_or_default();

            writeln!(
                out,
                "Started a new cart from {restaurant}; removed {discarded} line(s) from {previous}"
            )?;
            writeln!(out, "Added {} to your cart", name(id))?;
        }
        CartChange::QuantityUpdated { id, quantity } => {
            writeln!(out, "{} quantity set to {quantity}", name(id))?;
        }
        CartChange::Removed(id) => writeln!(out, "Removed {id} from your cart")?,
        CartChange::Cleared => writeln!(out, "Cart cleared")?,
        CartChange::Unchanged => writeln!(out, "Nothing to change")?,
    }

    Ok(())
}
