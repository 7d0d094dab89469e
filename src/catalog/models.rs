//! Catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, RestaurantId, SectionId};

/// A restaurant listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Restaurant id
    pub id: RestaurantId,

    /// Display name
    pub name: String,

    /// Short blurb
    pub description: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// Image URLs, cover image first
    pub images: Vec<String>,
}

/// A titled group of menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    /// Section id
    pub id: SectionId,

    /// Owning restaurant
    pub restaurant_id: RestaurantId,

    /// Title
    pub name: String,

    /// Subtitle
    pub description: Option<String>,

    /// Sort key within the restaurant's menu
    pub position: i32,
}

/// Something that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item id, also the cart line id
    pub id: ProductId,

    /// Owning section
    pub section_id: SectionId,

    /// Display name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Unit price
    pub price: Decimal,

    /// Photo
    pub image_url: Option<String>,

    /// Whether the item can currently be ordered
    pub is_available: bool,

    /// Sort key within the section
    pub position: i32,

    /// Vegetarian marker
    pub is_vegetarian: bool,
}

/// One section of a restaurant's menu with its orderable items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry<'a> {
    /// The section
    pub section: &'a MenuSection,

    /// Available items, by position
    pub items: Vec<&'a MenuItem>,
}
