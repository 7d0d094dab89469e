//! Receipt
//!
//! Plain-text rendering of a cart and its order summary.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartState, pricing::OrderSummary};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Writes the cart lines as a table followed by the order summary.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing to `out` fails.
pub fn write_cart(
    mut out: impl io::Write,
    state: &CartState,
    summary: &OrderSummary,
) -> Result<(), ReceiptError> {
    if state.is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    if let Some(restaurant) = state.restaurant_name() {
        writeln!(out, "Order from {restaurant}")?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "", "Qty", "Unit Price", "Total"]);

    for line in state.lines() {
        builder.push_record([
            line.name().to_string(),
            if line.is_vegetarian() { "veg" } else { "" }.to_string(),
            line.quantity().to_string(),
            summary.money(line.unit_price()).to_string(),
            summary.money(line.line_total()).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    write_summary(out, summary)
}

/// Writes the subtotal, fees and total, one per line.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if writing to `out` fails.
pub fn write_summary(mut out: impl io::Write, summary: &OrderSummary) -> Result<(), ReceiptError> {
    let rows = [
        ("Subtotal", summary.subtotal()),
        ("Delivery Fee", summary.delivery_fee()),
        ("Taxes", summary.tax()),
        ("Total", summary.total()),
    ];

    for (label, amount) in rows {
        writeln!(out, "{label:>14}: {:>10}", summary.money(amount).to_string())?;
    }

    Ok(())
}
