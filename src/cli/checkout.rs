use std::io::Write;

use clap::Args;
use foodie_cart::{
    checkout::{DeliveryDetails, place_order},
    context::AppContext,
    receipt,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Recipient name
    #[arg(long)]
    name: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// Notes for the courier
    #[arg(long)]
    instructions: Option<String>,
}

impl From<CheckoutArgs> for DeliveryDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            address: args.address,
            city: args.city,
            instructions: args.instructions,
        }
    }
}

pub(crate) fn run(
    args: CheckoutArgs,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let confirmation = place_order(
        &mut context.cart,
        context.user.as_ref(),
        args.into(),
        &context.pricing,
    )?;

    writeln!(out, "Order {} placed", confirmation.order_id)?;
    writeln!(out, "Restaurant: {}", confirmation.restaurant_name)?;
    writeln!(
        out,
        "Delivering to {}, {}, {}",
        confirmation.details.name, confirmation.details.address, confirmation.details.city
    )?;
    writeln!(
        out,
        "Total: {}",
        confirmation.summary.money(confirmation.summary.total())
    )?;
    writeln!(out, "Placed at {}", confirmation.placed_at)?;

    receipt::write_summary(out, &confirmation.summary)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use foodie_cart::checkout::{CheckoutError, Field};
    use testresult::TestResult;

    use crate::cli::test_support::context;

    use super::*;

    fn args() -> CheckoutArgs {
        CheckoutArgs {
            name: "Ada Lovelace".to_string(),
            phone: "5550102000".to_string(),
            address: "12 Olive Street".to_string(),
            city: "Springfield".to_string(),
            instructions: None,
        }
    }

    #[test]
    fn signed_in_user_places_order() -> TestResult {
        let (_dir, mut context) = context(Some("ada"))?;
        let candidate = context.catalog.cart_candidate(&"margherita".into())?;
        context.cart.add_item(candidate)?;
        let mut out = Vec::new();

        run(args(), &mut context, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Restaurant: Roma"));
        assert!(text.contains("Total: $14.33"));
        assert_eq!(context.cart.item_count(), 0);

        Ok(())
    }

    #[test]
    fn anonymous_checkout_is_refused() -> TestResult {
        let (_dir, mut context) = context(None)?;
        let candidate = context.catalog.cart_candidate(&"margherita".into())?;
        context.cart.add_item(candidate)?;

        let result = run(args(), &mut context, &mut Vec::new());

        assert!(matches!(
            result,
            Err(CliError::Checkout(CheckoutError::NotSignedIn))
        ));
        assert_eq!(context.cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn short_phone_is_reported() -> TestResult {
        let (_dir, mut context) = context(Some("ada"))?;
        let candidate = context.catalog.cart_candidate(&"margherita".into())?;
        context.cart.add_item(candidate)?;

        let result = run(
            CheckoutArgs {
                phone: "555".to_string(),
                ..args()
            },
            &mut context,
            &mut Vec::new(),
        );

        match result {
            Err(CliError::Checkout(CheckoutError::InvalidDetails(errors))) => {
                assert_eq!(errors.get(Field::Phone), Some("Enter a valid phone number"));
            }
            other => panic!("expected invalid details, got {other:?}"),
        }

        Ok(())
    }
}
