//! Place an order for the current cart.

use anyhow::{anyhow, Context as _, Result};
use dialoguer::Confirm;
use turbo_commerce::checkout::{PaymentMethod, PaymentSelection, ShippingAddress};
use turbo_storefront::confirmation::resolve_confirmation;
use turbo_storefront::views::{CheckoutView, ConfirmationView};
use turbo_storefront::{CartManager, OrderAssembler};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let payment = PaymentMethod::from_code(&args.payment)
        .ok_or_else(|| anyhow!("Unknown payment method: {}", args.payment))?;

    let mut address = ShippingAddress::new(args.name, args.street, args.city, args.country);
    if let Some(zip) = args.zip {
        address = address.with_zip_code(zip);
    }
    if let Some(phone) = args.phone {
        address = address.with_phone(phone);
    }

    let currency = ctx.config.pricing.currency()?;
    let mut cart = CartManager::new(ctx.api.clone(), ctx.config.pricing.policy(), currency);
    let spinner = ctx.output.spinner("Loading cart...");
    let loaded = cart.load().await.map(|_| ());
    spinner.finish_and_clear();
    loaded.context("Failed to load cart")?;

    let mut assembler = OrderAssembler::new(ctx.api.clone(), ctx.config.checkout.clone());
    let pricing = cart.pricing()?;

    if !ctx.output.is_json() {
        ctx.output.header("Checkout");
        print!(
            "{}",
            CheckoutView::build(cart.cart(), &pricing, assembler.state()).render()
        );
        println!("\nShip to: {}, {}", address.name, address.one_line());
        println!("Payment: {}", payment.display_name());
    }

    if !args.yes && !ctx.output.is_json() && !cart.cart().is_empty() && address.is_complete() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", pricing.grand_total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Order not placed");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = assembler
        .submit(cart.cart(), &address, &PaymentSelection::new(payment))
        .await;
    spinner.finish_and_clear();

    let order = match result {
        Ok(order) => order,
        Err(e) => {
            let message = assembler
                .state()
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.user_message());
            return Err(anyhow!(message));
        }
    };

    let order = resolve_confirmation(Some(order), ctx.config.checkout.confirmation_delay()).await;
    ctx.output.success("Order placed successfully!");
    let view = ConfirmationView::build(&order);
    ctx.output.view(&view, &view.render());
    Ok(())
}
