use std::io::Write;

use clap::{Args, Subcommand};
use foodie_cart::{context::AppContext, favorites::FavoriteKind, ids::RestaurantId};
use rusty_money::Money;
use tabled::{builder::Builder, settings::Style};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// List restaurants
    List,

    /// Show a restaurant's menu
    Show {
        /// Restaurant id
        restaurant: String,
    },
}

pub(crate) fn run(
    command: MenuCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        MenuSubcommand::List => list(context, out),
        MenuSubcommand::Show { restaurant } => show(context, &RestaurantId::from(restaurant), out),
    }
}

fn list(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Address", ""]);

    for restaurant in context.catalog.restaurants() {
        let favorite = context
            .favorites
            .is_favorite(FavoriteKind::Restaurant, restaurant.id.as_str());

        builder.push_record([
            restaurant.id.to_string(),
            restaurant.name.clone(),
            restaurant.address.clone().unwrap_or_default(),
            if favorite { "*" } else { "" }.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

fn show(context: &AppContext, id: &RestaurantId, out: &mut impl Write) -> Result<(), CliError> {
    let menu = context.catalog.menu(id)?;

    if let Some(restaurant) = context.catalog.restaurant(id) {
        writeln!(out, "{}", restaurant.name)?;

        if let Some(description) = &restaurant.description {
            writeln!(out, "{description}")?;
        }
    }

    for entry in menu {
        writeln!(out)?;
        writeln!(out, "{}", entry.section.name)?;

        if entry.items.is_empty() {
            writeln!(out, "  Nothing available right now")?;
            continue;
        }

        let mut builder = Builder::default();

        builder.push_record(["Id", "Item", "", "Price", ""]);

        for item in entry.items {
            let favorite = context
                .favorites
                .is_favorite(FavoriteKind::MenuItem, item.id.as_str());

            builder.push_record([
                item.id.to_string(),
                item.name.clone(),
                if item.is_vegetarian { "veg" } else { "" }.to_string(),
                Money::from_decimal(item.price, context.pricing.currency).to_string(),
                if favorite { "*" } else { "" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());

        writeln!(out, "{table}")?;
    }

    Ok(())
}
