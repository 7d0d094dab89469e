//! Cart state and its transitions

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartError, InvariantViolation, lines::CartLine, lines::NewCartLine},
    ids::{ProductId, RestaurantId},
};

/// What a single cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity one.
    Added(ProductId),

    /// An existing line gained one unit.
    Incremented {
        /// Line that was incremented.
        id: ProductId,

        /// Quantity after the increment.
        quantity: u32,
    },

    /// The cart held another restaurant's lines; they were dropped and the
    /// new product became the only line.
    RestaurantSwitched {
        /// Restaurant whose lines were dropped.
        previous: RestaurantId,

        /// Number of lines dropped.
        discarded: usize,

        /// The product now in the cart.
        id: ProductId,
    },

    /// A line's quantity was set.
    QuantityUpdated {
        /// Line that was updated.
        id: ProductId,

        /// New quantity.
        quantity: u32,
    },

    /// A line was removed.
    Removed(ProductId),

    /// Every line was removed.
    Cleared,

    /// Nothing matched; the state is as before.
    Unchanged,
}

impl CartChange {
    /// Returns `true` unless the operation was a no-op.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The order draft: an ordered list of lines from a single restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from already-formed lines, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, InvariantViolation> {
        let state = Self { lines };

        state.validate()?;

        Ok(state)
    }

    /// Checks the single-restaurant, unique-line, positive-quantity,
    /// non-negative-price and representable-total invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = FxHashSet::default();

        for line in &self.lines {
            let expected = self.restaurant_id().unwrap_or(line.restaurant_id());

            if line.restaurant_id() != expected {
                return Err(InvariantViolation::MixedRestaurants {
                    line: line.id().clone(),
                    expected: expected.clone(),
                    found: line.restaurant_id().clone(),
                });
            }

            if !seen.insert(line.id()) {
                return Err(InvariantViolation::DuplicateLine(line.id().clone()));
            }

            if line.quantity() == 0 {
                return Err(InvariantViolation::ZeroQuantity(line.id().clone()));
            }

            if line.unit_price() < Decimal::ZERO {
                return Err(InvariantViolation::NegativePrice(line.id().clone()));
            }
        }

        if self.checked_total().is_none() {
            return Err(InvariantViolation::TotalOverflow);
        }

        Ok(())
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Quantity of a product in the cart, zero when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, CartLine::quantity)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Saturates at [`Decimal::MAX`]; a state that passes
    /// [`validate`](Self::validate) never does.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }

    /// Sum of unit price times quantity over all lines, `None` on overflow.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.checked_line_total()?))
    }

    /// Cart total if the line for `id` held `quantity` units at `unit_price`.
    fn total_with(&self, id: &ProductId, unit_price: Decimal, quantity: u32) -> Option<Decimal> {
        let line_total = unit_price.checked_mul(Decimal::from(quantity))?;

        self.lines
            .iter()
            .filter(|line| line.id() != id)
            .try_fold(line_total, |sum, line| sum.checked_add(line.checked_line_total()?))
    }

    fn ensure_total_fits(
        &self,
        id: &ProductId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<(), CartError> {
        if self.total_with(id, unit_price, quantity).is_none() {
            return Err(CartError::InvalidItem {
                id: id.to_string(),
                reason: "cart total would overflow",
            });
        }

        Ok(())
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Restaurant of the first line, if any.
    pub fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.lines.first().map(CartLine::restaurant_id)
    }

    /// Restaurant name of the first line, if any.
    pub fn restaurant_name(&self) -> Option<&str> {
        self.lines.first().map(CartLine::restaurant_name)
    }

    pub(crate) fn add_item(&mut self, candidate: NewCartLine) -> Result<CartChange, CartError> {
        candidate.validate()?;

        if let Some(current) = self
            .restaurant_id()
            .filter(|current| **current != candidate.restaurant_id)
        {
            let previous = current.clone();
            let discarded = self.lines.len();
            let id = candidate.id.clone();

            self.lines = vec![CartLine::from_candidate(candidate)];

            return Ok(CartChange::RestaurantSwitched {
                previous,
                discarded,
                id,
            });
        }

        if let Some(line) = self.line(&candidate.id) {
            let quantity = line.quantity().saturating_add(1);
            self.ensure_total_fits(&candidate.id, line.unit_price(), quantity)?;
            self.set_quantity(&candidate.id, quantity);

            return Ok(CartChange::Incremented {
                id: candidate.id,
                quantity,
            });
        }

        self.ensure_total_fits(&candidate.id, candidate.unit_price, 1)?;

        let id = candidate.id.clone();
        self.lines.push(CartLine::from_candidate(candidate));

        Ok(CartChange::Added(id))
    }

    pub(crate) fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<CartChange, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line(id) else {
            return Ok(CartChange::Unchanged);
        };

        self.ensure_total_fits(id, line.unit_price(), quantity)?;
        self.set_quantity(id, quantity);

        Ok(CartChange::QuantityUpdated {
            id: id.clone(),
            quantity,
        })
    }

    fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
            line.set_quantity(quantity);
        }
    }

    pub(crate) fn remove_item(&mut self, id: &ProductId) -> CartChange {
        let before = self.lines.len();

        self.lines.retain(|line| line.id() != id);

        if self.lines.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed(id.clone())
        }
    }

    pub(crate) fn clear(&mut self) -> CartChange {
        self.lines.clear();

        CartChange::Cleared
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pizza(id: &str, restaurant: &str, cents: i64) -> NewCartLine {
        NewCartLine::new(id, restaurant, format!("{restaurant} kitchen"), id, Decimal::new(cents, 2))
    }

    #[test]
    fn empty_state_queries() {
        let state = CartState::new();

        assert_eq!(state.total(), Decimal::ZERO);
        assert_eq!(state.item_count(), 0);
        assert_eq!(state.restaurant_id(), None);
        assert_eq!(state.restaurant_name(), None);
        assert!(state.is_empty());
    }

    #[test]
    fn add_appends_in_insertion_order() -> TestResult {
        let mut state = CartState::new();

        state.add_item(pizza("b", "R1", 500))?;
        state.add_item(pizza("a", "R1", 1000))?;

        let ids: Vec<&str> = state.lines().iter().map(|line| line.id().as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);

        Ok(())
    }

    #[test]
    fn add_keeps_original_price_on_increment() -> TestResult {
        let mut state = CartState::new();

        state.add_item(pizza("a", "R1", 1000))?;
        let change = state.add_item(pizza("a", "R1", 1500))?;

        assert_eq!(
            change,
            CartChange::Incremented {
                id: ProductId::from("a"),
                quantity: 2
            }
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.total(), Decimal::new(2000, 2));

        Ok(())
    }

    #[test]
    fn add_from_other_restaurant_reports_switch() -> TestResult {
        let mut state = CartState::new();

        state.add_item(pizza("a", "R1", 1000))?;
        state.add_item(pizza("c", "R1", 300))?;
        let change = state.add_item(pizza("b", "R2", 500))?;

        assert_eq!(
            change,
            CartChange::RestaurantSwitched {
                previous: RestaurantId::from("R1"),
                discarded: 2,
                id: ProductId::from("b"),
            }
        );
        assert_eq!(state.restaurant_id(), Some(&RestaurantId::from("R2")));
        assert_eq!(state.len(), 1);

        Ok(())
    }

    #[test]
    fn invalid_candidate_leaves_state_untouched() -> TestResult {
        let mut state = CartState::new();
        state.add_item(pizza("a", "R1", 1000))?;
        let before = state.clone();

        let result = state.add_item(pizza("b", "R2", -5));

        assert!(matches!(result, Err(CartError::InvalidItem { .. })));
        assert_eq!(state, before);

        Ok(())
    }

    #[test]
    fn update_quantity_absent_is_unchanged() {
        let mut state = CartState::new();

        assert_eq!(
            state.update_quantity(&ProductId::from("ghost"), 4),
            Ok(CartChange::Unchanged)
        );
    }

    #[test]
    fn update_quantity_saturates_large_values() -> TestResult {
        let mut state = CartState::new();
        state.add_item(pizza("a", "R1", 100))?;

        let change = state.update_quantity(&ProductId::from("a"), i64::MAX)?;

        assert_eq!(
            change,
            CartChange::QuantityUpdated {
                id: ProductId::from("a"),
                quantity: u32::MAX
            }
        );
        assert_eq!(state.quantity_of(&ProductId::from("a")), u32::MAX);

        Ok(())
    }

    #[test]
    fn update_quantity_negative_removes() -> TestResult {
        let mut state = CartState::new();
        state.add_item(pizza("a", "R1", 100))?;

        let change = state.update_quantity(&ProductId::from("a"), -3)?;

        assert_eq!(change, CartChange::Removed(ProductId::from("a")));
        assert!(state.is_empty());

        Ok(())
    }

    #[test]
    fn from_lines_rejects_mixed_restaurants() -> TestResult {
        let mut first = CartState::new();
        first.add_item(pizza("a", "R1", 100))?;
        let mut second = CartState::new();
        second.add_item(pizza("b", "R2", 100))?;

        let mut lines = first.lines().to_vec();
        lines.extend_from_slice(second.lines());

        assert!(matches!(
            CartState::from_lines(lines),
            Err(InvariantViolation::MixedRestaurants { .. })
        ));

        Ok(())
    }

    #[test]
    fn from_lines_rejects_duplicates_and_zero_quantities() -> TestResult {
        let mut state = CartState::new();
        state.add_item(pizza("a", "R1", 100))?;

        let duplicated = [state.lines(), state.lines()].concat();
        assert_eq!(
            CartState::from_lines(duplicated),
            Err(InvariantViolation::DuplicateLine(ProductId::from("a")))
        );

        let mut zeroed = state.lines().to_vec();
        for line in &mut zeroed {
            line.set_quantity(0);
        }
        assert_eq!(
            CartState::from_lines(zeroed),
            Err(InvariantViolation::ZeroQuantity(ProductId::from("a")))
        );

        Ok(())
    }

    fn gold(id: &str) -> NewCartLine {
        NewCartLine::new(id, "R1", "R1 kitchen", "Gold leaf", Decimal::MAX)
    }

    #[test]
    fn add_rejects_increment_past_max_total() -> TestResult {
        let mut state = CartState::new();
        state.add_item(gold("a"))?;
        let before = state.clone();

        let result = state.add_item(gold("a"));

        assert_eq!(
            result,
            Err(CartError::InvalidItem {
                id: "a".to_string(),
                reason: "cart total would overflow",
            })
        );
        assert_eq!(state, before);
        assert_eq!(state.total(), Decimal::MAX);

        Ok(())
    }

    #[test]
    fn add_rejects_new_line_past_max_total() -> TestResult {
        let mut state = CartState::new();
        state.add_item(gold("a"))?;

        let result = state.add_item(pizza("b", "R1", 100));

        assert!(matches!(result, Err(CartError::InvalidItem { id, .. }) if id == "b"));
        assert_eq!(state.len(), 1);

        Ok(())
    }

    #[test]
    fn switching_restaurant_clears_room_for_expensive_items() -> TestResult {
        let mut state = CartState::new();
        state.add_item(pizza("a", "R2", 100))?;

        state.add_item(gold("b"))?;

        assert_eq!(state.total(), Decimal::MAX);

        Ok(())
    }

    #[test]
    fn update_quantity_rejects_overflowing_total() -> TestResult {
        let mut state = CartState::new();
        state.add_item(gold("a"))?;

        let result = state.update_quantity(&ProductId::from("a"), 2);

        assert!(matches!(result, Err(CartError::InvalidItem { .. })));
        assert_eq!(state.quantity_of(&ProductId::from("a")), 1);
        assert_eq!(state.checked_total(), Some(Decimal::MAX));

        Ok(())
    }

    #[test]
    fn from_lines_rejects_overflowing_total() -> TestResult {
        let mut state = CartState::new();
        state.add_item(gold("a"))?;

        let mut doubled = state.lines().to_vec();
        for line in &mut doubled {
            line.set_quantity(2);
        }

        assert_eq!(
            CartState::from_lines(doubled),
            Err(InvariantViolation::TotalOverflow)
        );

        Ok(())
    }
}
