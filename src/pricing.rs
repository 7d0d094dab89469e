//! Pricing

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::cart::CartState;

/// Errors raised while reading pricing settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount is not a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("amount must not be negative: {0}")]
    NegativeAmount(Decimal),

    /// The currency code is not supported.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Fees and currency applied on top of the cart total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    /// Flat fee charged for any non-empty order.
    pub delivery_fee: Decimal,

    /// Tax rate applied to the subtotal, as a fraction (`0.08` is 8%).
    pub tax_rate: Decimal,

    /// Currency all prices are expressed in.
    pub currency: &'static Currency,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(299, 2),
            tax_rate: Decimal::new(8, 2),
            currency: iso::USD,
        }
    }
}

/// Parses a non-negative decimal amount such as `"2.99"`.
///
/// # Errors
///
/// Returns [`PricingError::InvalidAmount`] if the string is not a decimal and
/// [`PricingError::NegativeAmount`] if it is below zero.
pub fn parse_amount(s: &str) -> Result<Decimal, PricingError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidAmount(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(PricingError::NegativeAmount(amount));
    }

    Ok(amount)
}

/// Looks up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for anything other than `USD`,
/// `GBP` or `EUR`.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        _ => Err(PricingError::UnknownCurrency(code.to_string())),
    }
}

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    subtotal: Decimal,
    delivery_fee: Decimal,
    tax: Decimal,
    total: Decimal,
    item_count: u64,
    currency: &'static Currency,
}

impl OrderSummary {
    /// Prices a cart.
    ///
    /// Tax is rounded to cents, midpoint away from zero. An empty cart is not
    /// charged a delivery fee. Amounts saturate at [`Decimal::MAX`].
    pub fn for_cart(state: &CartState, config: &PricingConfig) -> Self {
        let subtotal = state.total();

        let delivery_fee = if state.is_empty() {
            Decimal::ZERO
        } else {
            config.delivery_fee
        };

        let tax = subtotal
            .saturating_mul(config.tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal.saturating_add(delivery_fee).saturating_add(tax),
            item_count: state.item_count(),
            currency: config.currency,
        }
    }

    /// Cart total before fees.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Delivery fee charged.
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    /// Tax charged.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Amount payable.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Currency of every amount.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Wraps an amount in this summary's currency for display.
    pub fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::{CartStore, NewCartLine};

    use super::*;

    fn cart_with(lines: &[(&str, i64, i64)]) -> TestResult<CartStore> {
        let mut store = CartStore::new();

        for &(id, cents, quantity) in lines {
            store.add_item(NewCartLine::new(id, "R1", "Roma", id, Decimal::new(cents, 2)))?;
            store.update_quantity(&id.into(), quantity)?;
        }

        Ok(store)
    }

    #[test]
    fn summary_adds_fee_and_tax() -> TestResult {
        let store = cart_with(&[("a", 1000, 2), ("b", 550, 1)])?;

        let summary = OrderSummary::for_cart(store.state(), &PricingConfig::default());

        assert_eq!(summary.subtotal(), Decimal::new(2550, 2));
        assert_eq!(summary.delivery_fee(), Decimal::new(299, 2));
        assert_eq!(summary.tax(), Decimal::new(204, 2));
        assert_eq!(summary.total(), Decimal::new(3053, 2));
        assert_eq!(summary.item_count(), 3);

        Ok(())
    }

    #[test]
    fn tax_rounds_half_cents_away_from_zero() -> TestResult {
        let mut store = CartStore::new();
        store.add_item(NewCartLine::new("a", "R1", "Roma", "Mint", Decimal::new(625, 4)))?;

        let summary = OrderSummary::for_cart(store.state(), &PricingConfig::default());

        assert_eq!(summary.tax(), Decimal::new(1, 2));

        Ok(())
    }

    #[test]
    fn largest_cart_total_saturates() -> TestResult {
        let mut store = CartStore::new();
        store.add_item(NewCartLine::new("a", "R1", "Roma", "Gold", Decimal::MAX))?;

        let summary = OrderSummary::for_cart(store.state(), &PricingConfig::default());

        assert_eq!(summary.subtotal(), Decimal::MAX);
        assert_eq!(summary.total(), Decimal::MAX);

        Ok(())
    }

    #[test]
    fn empty_cart_costs_nothing() {
        let summary = OrderSummary::for_cart(&CartState::new(), &PricingConfig::default());

        assert_eq!(summary.total(), Decimal::ZERO);
        assert_eq!(summary.delivery_fee(), Decimal::ZERO);
        assert_eq!(summary.item_count(), 0);
    }

    #[test]
    fn money_uses_configured_currency() -> TestResult {
        let store = cart_with(&[("a", 1000, 1)])?;
        let config = PricingConfig {
            currency: iso::GBP,
            ..PricingConfig::default()
        };

        let summary = OrderSummary::for_cart(store.state(), &config);

        assert_eq!(summary.money(summary.subtotal()), Money::from_minor(1000, iso::GBP));

        Ok(())
    }

    #[test]
    fn parse_amount_accepts_decimals() -> TestResult {
        assert_eq!(parse_amount(" 2.99 ")?, Decimal::new(299, 2));
        assert_eq!(parse_amount("0")?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn parse_amount_rejects_bad_input() {
        assert_eq!(
            parse_amount("two"),
            Err(PricingError::InvalidAmount("two".to_string()))
        );
        assert_eq!(
            parse_amount("-1"),
            Err(PricingError::NegativeAmount(Decimal::NEGATIVE_ONE))
        );
    }

    #[test]
    fn parse_currency_is_case_insensitive() -> TestResult {
        assert_eq!(parse_currency("gbp")?, iso::GBP);
        assert!(parse_currency("XYZ").is_err());

        Ok(())
    }
}
