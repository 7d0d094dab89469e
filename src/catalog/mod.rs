//! Catalog
//!
//! Read-only restaurants and menus, loaded from a YAML file shaped like the
//! hosted tables but nested: restaurants hold sections, sections hold items.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::NewCartLine,
    ids::{ProductId, RestaurantId, SectionId},
    pricing::{PricingError, parse_amount},
};

mod models;

pub use models::{MenuEntry, MenuItem, MenuSection, Restaurant};

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid YAML for the catalog shape.
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A menu item price is malformed.
    #[error("invalid price for menu item {item}: {source}")]
    InvalidPrice {
        /// Offending item
        item: ProductId,

        /// Parse failure
        #[source]
        source: PricingError,
    },

    /// Two records of the same kind share an id.
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),

    /// No restaurant with this id.
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// No menu item with this id.
    #[error("menu item not found: {0}")]
    ItemNotFound(ProductId),

    /// The item exists but cannot be ordered right now.
    #[error("menu item is unavailable: {0}")]
    ItemUnavailable(ProductId),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    restaurants: Vec<RestaurantFixture>,
}

#[derive(Debug, Deserialize)]
struct RestaurantFixture {
    id: RestaurantId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    sections: Vec<SectionFixture>,
}

#[derive(Debug, Deserialize)]
struct SectionFixture {
    id: SectionId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    position: i32,
    #[serde(default)]
    items: Vec<ItemFixture>,
}

#[derive(Debug, Deserialize)]
struct ItemFixture {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default = "available_by_default")]
    is_available: bool,
    #[serde(default)]
    position: i32,
    #[serde(default)]
    is_vegetarian: bool,
}

fn available_by_default() -> bool {
    true
}

/// Restaurants, sections and menu items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    sections: Vec<MenuSection>,
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Loads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Catalog::from_yaml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;

        debug!(
            path = %path.display(),
            restaurants = catalog.restaurants.len(),
            items = catalog.items.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Parses a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, malformed or negative prices, and
    /// duplicate restaurant, section or item ids.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let mut catalog = Self::default();
        let mut seen = FxHashSet::default();

        for restaurant in fixture.restaurants {
            claim(&mut seen, "restaurant", restaurant.id.as_str())?;

            for section in restaurant.sections {
                claim(&mut seen, "section", section.id.as_str())?;

                for item in section.items {
                    claim(&mut seen, "item", item.id.as_str())?;

                    let price = parse_amount(&item.price).map_err(|source| {
                        CatalogError::InvalidPrice {
                            item: item.id.clone(),
                            source,
                        }
                    })?;

                    catalog.items.push(MenuItem {
                        id: item.id,
                        section_id: section.id.clone(),
                        name: item.name,
                        description: item.description,
                        price,
                        image_url: item.image_url,
                        is_available: item.is_available,
                        position: item.position,
                        is_vegetarian: item.is_vegetarian,
                    });
                }

                catalog.sections.push(MenuSection {
                    id: section.id,
                    restaurant_id: restaurant.id.clone(),
                    name: section.name,
                    description: section.description,
                    position: section.position,
                });
            }

            catalog.restaurants.push(Restaurant {
                id: restaurant.id,
                name: restaurant.name,
                description: restaurant.description,
                phone: restaurant.phone,
                address: restaurant.address,
                images: restaurant.images,
            });
        }

        Ok(catalog)
    }

    /// Every restaurant, in file order.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Looks up a restaurant.
    pub fn restaurant(&self, id: &RestaurantId) -> Option<&Restaurant> {
        self.restaurants.iter().find(|restaurant| &restaurant.id == id)
    }

    /// A restaurant's menu: sections by position, each with its available
    /// items by position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] for an unknown restaurant.
    pub fn menu(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuEntry<'_>>, CatalogError> {
        if self.restaurant(restaurant_id).is_none() {
            return Err(CatalogError::RestaurantNotFound(restaurant_id.clone()));
        }

        let mut sections: Vec<&MenuSection> = self
            .sections
            .iter()
            .filter(|section| &section.restaurant_id == restaurant_id)
            .collect();

        sections.sort_by_key(|section| section.position);

        Ok(sections
            .into_iter()
            .map(|section| {
                let mut items: Vec<&MenuItem> = self
                    .items
                    .iter()
                    .filter(|item| item.section_id == section.id && item.is_available)
                    .collect();

                items.sort_by_key(|item| item.position);

                MenuEntry { section, items }
            })
            .collect())
    }

    /// Finds a menu item and the restaurant selling it.
    pub fn find_item(&self, id: &ProductId) -> Option<(&MenuItem, &Restaurant)> {
        let item = self.items.iter().find(|item| &item.id == id)?;

        let section = self
            .sections
            .iter()
            .find(|section| section.id == item.section_id)?;

        let restaurant = self.restaurant(&section.restaurant_id)?;

        Some((item, restaurant))
    }

    /// Builds the cart candidate for a menu item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ItemNotFound`] for an unknown item and
    /// [`CatalogError::ItemUnavailable`] if it cannot be ordered.
    pub fn cart_candidate(&self, id: &ProductId) -> Result<NewCartLine, CatalogError> {
        let (item, restaurant) = self
            .find_item(id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.clone()))?;

        if !item.is_available {
            return Err(CatalogError::ItemUnavailable(id.clone()));
        }

        let mut candidate = NewCartLine::new(
            item.id.clone(),
            restaurant.id.clone(),
            restaurant.name.clone(),
            item.name.clone(),
            item.price,
        )
        .vegetarian(item.is_vegetarian);

        candidate.image_url.clone_from(&item.image_url);

        Ok(candidate)
    }
}

fn claim(
    seen: &mut FxHashSet<(&'static str, String)>,
    kind: &'static str,
    id: &str,
) -> Result<(), CatalogError> {
    if seen.insert((kind, id.to_string())) {
        Ok(())
    } else {
        Err(CatalogError::DuplicateId(format!("{kind} {id}")))
    }
}
