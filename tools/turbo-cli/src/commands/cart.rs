//! Show and change the cart.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use turbo_commerce::cart::Cart;
use turbo_commerce::error::CommerceError;
use turbo_commerce::ids::ProductId;
use turbo_storefront::CartManager;

use super::{CartAction, CartArgs};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.pricing.currency()?;
    let mut manager = CartManager::new(ctx.api.clone(), ctx.config.pricing.policy(), currency);

    let spinner = ctx.output.spinner("Loading cart...");
    let loaded = manager.load().await.map(|_| ());
    spinner.finish_and_clear();
    loaded.context("Failed to load cart")?;

    let action = args.action.unwrap_or(CartAction::Show);
    let message = match action {
        CartAction::Show => None,
        CartAction::Add { product, quantity } => {
            let id = ProductId::new(product);
            with_spinner(ctx, "Adding to cart...", manager.add(&id, quantity)).await?;
            Some(format!("Added {} x {}", quantity, id))
        }
        CartAction::Set { product, quantity } => {
            let id = ProductId::new(product);
            with_spinner(ctx, "Updating cart...", manager.add_or_update(&id, quantity)).await?;
            Some(format!("Set {} to {}", id, quantity))
        }
        CartAction::Inc { product } => {
            let id = ProductId::new(product);
            with_spinner(ctx, "Updating cart...", manager.increment(&id)).await?;
            Some(format!("Increased {}", id))
        }
        CartAction::Dec { product } => {
            let id = ProductId::new(product);
            match decrement_blocked(manager.cart(), &id) {
                Some(DecrementBlock::AtMinimum) => {
                    ctx.output.warn(&format!(
                        "{} is already at quantity 1; use `turbo cart remove` instead",
                        id
                    ));
                    None
                }
                Some(DecrementBlock::NotInCart) => {
                    anyhow::bail!(CommerceError::ItemNotInCart(id.to_string()));
                }
                None => {
                    with_spinner(ctx, "Updating cart...", manager.decrement(&id)).await?;
                    Some(format!("Decreased {}", id))
                }
            }
        }
        CartAction::Remove { product } => {
            let id = ProductId::new(product);
            with_spinner(ctx, "Removing item...", manager.remove(&id)).await?;
            Some(format!("Removed {}", id))
        }
        CartAction::Clear { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from your cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cart left unchanged");
                    return Ok(());
                }
            }
            with_spinner(ctx, "Clearing cart...", manager.clear()).await?;
            Some("Cart cleared".to_string())
        }
    };

    if let Some(message) = message {
        ctx.output.success(&message);
    }

    let view = manager.view()?;
    ctx.output.view(&view, &view.render());
    Ok(())
}

async fn with_spinner<T>(
    ctx: &Context,
    msg: &str,
    fut: impl std::future::Future<Output = Result<T, turbo_storefront::StorefrontError>>,
) -> Result<T> {
    let spinner = ctx.output.spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    result.map_err(|e| anyhow::anyhow!(e.user_message()))
}

#[derive(Debug, PartialEq, Eq)]
enum DecrementBlock {
    NotInCart,
    AtMinimum,
}

/// Why `cart dec` cannot go ahead, if it cannot.
fn decrement_blocked(cart: &Cart, product_id: &ProductId) -> Option<DecrementBlock> {
    match cart.quantity_of(product_id) {
        None => Some(DecrementBlock::NotInCart),
        Some(quantity) if quantity <= 1 => Some(DecrementBlock::AtMinimum),
        Some(_) => None,
    }
}
