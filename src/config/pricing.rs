//! Pricing Config

use clap::Args;
use foodie_cart::pricing::{PricingConfig, parse_amount, parse_currency};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

/// Fee, tax and currency settings.
#[derive(Debug, Args)]
pub(crate) struct PricingSettings {
    /// Flat delivery fee for any non-empty order
    #[arg(
        long,
        env = "FOODIE_DELIVERY_FEE",
        default_value = "2.99",
        value_parser = parse_amount,
        allow_hyphen_values = true,
        global = true
    )]
    pub delivery_fee: Decimal,

    /// Tax rate as a fraction of the subtotal
    #[arg(
        long,
        env = "FOODIE_TAX_RATE",
        default_value = "0.08",
        value_parser = parse_amount,
        allow_hyphen_values = true,
        global = true
    )]
    pub tax_rate: Decimal,

    /// ISO currency code (USD, GBP, EUR)
    #[arg(
        long,
        env = "FOODIE_CURRENCY",
        default_value = "USD",
        value_parser = parse_currency,
        global = true
    )]
    pub currency: &'static Currency,
}

impl From<&PricingSettings> for PricingConfig {
    fn from(settings: &PricingSettings) -> Self {
        Self {
            delivery_fee: settings.delivery_fee,
            tax_rate: settings.tax_rate,
            currency: settings.currency,
        }
    }
}
