//! Show placed orders.

use anyhow::{anyhow, Result};
use turbo_commerce::ids::OrderId;
use turbo_storefront::confirmation::resolve_confirmation;
use turbo_storefront::views::ConfirmationView;

use super::{OrderAction, OrderArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.action {
        OrderAction::Show { id } => show(id, ctx).await,
        OrderAction::List => list(ctx).await,
    }
}

async fn show(id: Option<String>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading order details...");
    let order = match id {
        Some(id) => {
            let fetched = ctx.api.get_order(&OrderId::new(id)).await;
            fetched.map(Some).map_err(|e| anyhow!(e))
        }
        None => Ok(None),
    };
    let order = match order {
        Ok(order) => resolve_confirmation(order, ctx.config.checkout.confirmation_delay()).await,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.context("Failed to load order"));
        }
    };
    spinner.finish_and_clear();

    let view = ConfirmationView::build(&order);
    ctx.output.view(&view, &view.render());
    Ok(())
}

async fn list(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading orders...");
    let orders = ctx.api.list_orders().await;
    spinner.finish_and_clear();
    let orders = orders.map_err(|e| anyhow!(e).context("Failed to load orders"))?;

    if ctx.output.is_json() {
        let views: Vec<_> = orders.iter().map(ConfirmationView::build).collect();
        ctx.output.json(&views);
        return Ok(());
    }

    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }

    ctx.output.header(&format!("Orders ({})", orders.len()));
    ctx.output
        .table_row(&["ORDER", "STATUS", "ITEMS", "TOTAL"], &[16, 12, 6, 12]);
    for order in &orders {
        let items = order.item_count().to_string();
        let total = order.total.display();
        ctx.output.table_row(
            &[
                order.order_number.as_str(),
                &status_badge(order.status.as_str()),
                &items,
                &total,
            ],
            &[16, 12, 6, 12],
        );
    }
    Ok(())
}
