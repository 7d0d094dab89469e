//! Cart lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartError,
    ids::{ProductId, RestaurantId},
};

/// A product about to be added to the cart.
///
/// Carries everything a [`CartLine`] needs except the quantity, which the
/// store manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    /// Product id, unique within the cart.
    pub id: ProductId,

    /// Restaurant the product is sold by.
    pub restaurant_id: RestaurantId,

    /// Restaurant display name.
    pub restaurant_name: String,

    /// Product display name.
    pub name: String,

    /// Price of one unit at the time of adding.
    pub unit_price: Decimal,

    /// Optional product image.
    pub image_url: Option<String>,

    /// Whether the product is vegetarian.
    pub is_vegetarian: bool,
}

impl NewCartLine {
    /// Creates a candidate with no image that is not flagged vegetarian.
    pub fn new(
        id: impl Into<ProductId>,
        restaurant_id: impl Into<RestaurantId>,
        restaurant_name: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            restaurant_name: restaurant_name.into(),
            name: name.into(),
            unit_price,
            image_url: None,
            is_vegetarian: false,
        }
    }

    /// Sets the image url.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the vegetarian flag.
    #[must_use]
    pub fn vegetarian(mut self, is_vegetarian: bool) -> Self {
        self.is_vegetarian = is_vegetarian;
        self
    }

    /// Checks the candidate before it reaches the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] for a blank product id, a blank
    /// restaurant id or a negative unit price.
    pub fn validate(&self) -> Result<(), CartError> {
        let reason = if self.id.is_blank() {
            "product id is blank"
        } else if self.restaurant_id.is_blank() {
            "restaurant id is blank"
        } else if self.unit_price < Decimal::ZERO {
            "unit price is negative"
        } else {
            return Ok(());
        };

        Err(CartError::InvalidItem {
            id: self.id.to_string(),
            reason,
        })
    }
}

/// One distinct product in the cart, with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    id: ProductId,
    restaurant_id: RestaurantId,
    restaurant_name: String,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default)]
    is_vegetarian: bool,
}

impl CartLine {
    /// Builds a quantity-one line; the price is fixed from here on.
    pub(crate) fn from_candidate(candidate: NewCartLine) -> Self {
        Self {
            id: candidate.id,
            restaurant_id: candidate.restaurant_id,
            restaurant_name: candidate.restaurant_name,
            name: candidate.name,
            unit_price: candidate.unit_price,
            quantity: 1,
            image_url: candidate.image_url,
            is_vegetarian: candidate.is_vegetarian,
        }
    }

    /// Product id
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Restaurant id
    pub fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }

    /// Restaurant display name
    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    /// Product display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured when the line was created
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Product image, if any
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Vegetarian flag
    pub fn is_vegetarian(&self) -> bool {
        self.is_vegetarian
    }

    /// Unit price multiplied by quantity.
    ///
    /// Saturates at [`Decimal::MAX`]; carts built by the store never get
    /// there.
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// Unit price multiplied by quantity, `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn candidate(price: Decimal) -> NewCartLine {
        NewCartLine::new("a", "R1", "Roma", "Margherita", price)
    }

    #[test]
    fn validate_accepts_free_items() {
        assert_eq!(candidate(Decimal::ZERO).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let err = candidate(Decimal::new(-1, 2)).validate();

        assert_eq!(
            err,
            Err(CartError::InvalidItem {
                id: "a".to_string(),
                reason: "unit price is negative",
            })
        );
    }

    #[test]
    fn validate_rejects_blank_ids() {
        let mut blank_product = candidate(Decimal::ONE);
        blank_product.id = ProductId::new(" ");

        let mut blank_restaurant = candidate(Decimal::ONE);
        blank_restaurant.restaurant_id = RestaurantId::new("");

        assert!(matches!(
            blank_product.validate(),
            Err(CartError::InvalidItem { reason: "product id is blank", .. })
        ));
        assert!(matches!(
            blank_restaurant.validate(),
            Err(CartError::InvalidItem { reason: "restaurant id is blank", .. })
        ));
    }

    #[test]
    fn new_line_starts_at_quantity_one() {
        let line = CartLine::from_candidate(
            candidate(Decimal::new(1050, 2))
                .with_image_url("https://img/a.png")
                .vegetarian(true),
        );

        assert_eq!(line.quantity(), 1);
        assert_eq!(line.unit_price(), Decimal::new(1050, 2));
        assert_eq!(line.image_url(), Some("https://img/a.png"));
        assert!(line.is_vegetarian());
    }

    #[test]
    fn line_total_multiplies_by_quantity() {
        let mut line = CartLine::from_candidate(candidate(Decimal::new(250, 2)));
        line.set_quantity(3);

        assert_eq!(line.line_total(), Decimal::new(750, 2));
    }

    #[test]
    fn line_total_overflow_is_detected() {
        let mut line = CartLine::from_candidate(candidate(Decimal::MAX));
        line.set_quantity(2);

        assert_eq!(line.checked_line_total(), None);
        assert_eq!(line.line_total(), Decimal::MAX);
    }
}
