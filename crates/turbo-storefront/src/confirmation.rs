//! The step after a successful checkout.

use std::time::Duration;
use turbo_commerce::checkout::Order;

/// The order to confirm.
///
/// With an order from checkout it is returned straight away. Without one
/// (the confirmation was opened directly) the placeholder order is shown
/// after `delay`. Never fails.
pub async fn resolve_confirmation(order: Option<Order>, delay: Duration) -> Order {
    match order {
        Some(order) => order,
        None => {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "no order handed over, showing placeholder");
            tokio::time::sleep(delay).await;
            Order::placeholder()
        }
    }
}
