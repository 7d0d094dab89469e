use std::io::Write;

use clap::{Args, Subcommand};
use foodie_cart::{
    catalog::CatalogError,
    context::AppContext,
    favorites::{FavoriteKind, FavoriteToggle},
    ids::{ProductId, RestaurantId},
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct FavoritesCommand {
    #[command(subcommand)]
    command: FavoritesSubcommand,
}

#[derive(Debug, Subcommand)]
enum FavoritesSubcommand {
    /// List favorite restaurants and menu items
    List,

    /// Favorite or unfavorite a restaurant
    ToggleRestaurant {
        /// Restaurant id
        restaurant: String,
    },

    /// Favorite or unfavorite a menu item
    ToggleItem {
        /// Menu item id
        item: String,
    },
}

pub(crate) fn run(
    command: FavoritesCommand,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command.command {
        FavoritesSubcommand::List => list(context, out),
        FavoritesSubcommand::ToggleRestaurant { restaurant } => {
            let id = RestaurantId::from(restaurant);

            let name = context
                .catalog
                .restaurant(&id)
                .map(|restaurant| restaurant.name.clone())
                .ok_or_else(|| CatalogError::RestaurantNotFound(id.clone()))?;

            toggle(context, FavoriteKind::Restaurant, id.as_str(), &name, out)
        }
        FavoritesSubcommand::ToggleItem { item } => {
            let id = ProductId::from(item);

            let name = context
                .catalog
                .find_item(&id)
                .map(|(item, _)| item.name.clone())
                .ok_or_else(|| CatalogError::ItemNotFound(id.clone()))?;

            toggle(context, FavoriteKind::MenuItem, id.as_str(), &name, out)
        }
    }
}

fn toggle(
    context: &mut AppContext,
    kind: FavoriteKind,
    id: &str,
    name: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match context.favorites.toggle(context.user.as_ref(), kind, id)? {
        FavoriteToggle::Added => writeln!(out, "Added {name} to favorites")?,
        FavoriteToggle::Removed => writeln!(out, "Removed {name} from favorites")?,
    }

    Ok(())
}

fn list(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let restaurants = context.favorites.ids(FavoriteKind::Restaurant);
    let items = context.favorites.ids(FavoriteKind::MenuItem);

    writeln!(out, "Restaurants")?;

    if restaurants.is_empty() {
        writeln!(out, "  none yet")?;
    }

    for id in restaurants {
        let name = context
            .catalog
            .restaurant(&RestaurantId::from(id))
            .map_or(id, |restaurant| restaurant.name.as_str());

        writeln!(out, "  {name}")?;
    }

    writeln!(out, "Menu items")?;

    if items.is_empty() {
        writeln!(out, "  none yet")?;
    }

    for id in items {
        match context.catalog.find_item(&ProductId::from(id)) {
            Some((item, restaurant)) => writeln!(out, "  {} ({})", item.name, restaurant.name)?,
            None => writeln!(out, "  {id}")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use foodie_cart::favorites::FavoritesError;
    use testresult::TestResult;

    use crate::cli::test_support::context;

    use super::*;

    fn toggle_item(item: &str) -> FavoritesCommand {
        FavoritesCommand {
            command: FavoritesSubcommand::ToggleItem {
                item: item.to_string(),
            },
        }
    }

    #[test]
    fn toggle_and_list() -> TestResult {
        let (_dir, mut context) = context(Some("ada"))?;
        let mut out = Vec::new();

        run(toggle_item("tonkotsu"), &mut context, &mut out)?;
        run(
            FavoritesCommand {
                command: FavoritesSubcommand::ToggleRestaurant {
                    restaurant: "roma".to_string(),
                },
            },
            &mut context,
            &mut out,
        )?;
        run(
            FavoritesCommand {
                command: FavoritesSubcommand::List,
            },
            &mut context,
            &mut out,
        )?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Added Tonkotsu to favorites"));
        assert!(text.contains("Added Roma to favorites"));
        assert!(text.contains("  Roma\n"));
        assert!(text.contains("  Tonkotsu (Sakura)\n"));

        Ok(())
    }

    #[test]
    fn second_toggle_removes() -> TestResult {
        let (_dir, mut context) = context(Some("ada"))?;
        let mut out = Vec::new();

        run(toggle_item("tonkotsu"), &mut context, &mut out)?;
        run(toggle_item("tonkotsu"), &mut context, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Removed Tonkotsu from favorites"));
        assert!(!context.favorites.is_favorite(FavoriteKind::MenuItem, "tonkotsu"));

        Ok(())
    }

    #[test]
    fn anonymous_toggle_is_refused() -> TestResult {
        let (_dir, mut context) = context(None)?;

        let result = run(toggle_item("tonkotsu"), &mut context, &mut Vec::new());

        assert!(matches!(
            result,
            Err(CliError::Favorites(FavoritesError::NotSignedIn))
        ));

        Ok(())
    }
}
