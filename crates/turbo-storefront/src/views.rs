//! Display models for the cart, checkout and confirmation screens.
//!
//! Each view is plain data (serializable for `--json` output) with a
//! `render` that lays it out as text.

use serde::Serialize;
use std::fmt::Write as _;
use turbo_commerce::cart::{Cart, CartPricing};
use turbo_commerce::checkout::{CheckoutState, Order};
use turbo_commerce::error::EMPTY_CART;
use turbo_commerce::money::Money;

/// Label shown instead of a zero shipping fee.
pub const FREE_SHIPPING_LABEL: &str = "FREE";

/// A navigation target.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }

    pub fn continue_shopping() -> Self {
        Self::new("Continue Shopping", "/products")
    }

    pub fn checkout() -> Self {
        Self::new("Proceed to Checkout", "/checkout")
    }

    pub fn cart() -> Self {
        Self::new("View Cart", "/cart")
    }

    pub fn home() -> Self {
        Self::new("Home", "/")
    }
}

/// One cart line as displayed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub category: Option<String>,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    /// The minus button is disabled at quantity 1.
    pub can_decrement: bool,
}

/// Totals block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax_label: String,
    pub tax: String,
    pub total: String,
}

impl SummaryView {
    pub fn from_pricing(pricing: &CartPricing) -> Self {
        let shipping = if pricing.has_free_shipping() {
            FREE_SHIPPING_LABEL.to_string()
        } else {
            pricing.shipping_total.display()
        };
        Self {
            subtotal: pricing.subtotal.display(),
            shipping,
            tax_label: format!("Tax ({})", pricing.tax_rate_label()),
            tax: pricing.tax_total.display(),
            total: pricing.grand_total.display(),
        }
    }

    fn render_into(&self, out: &mut String) {
        let rows = [
            ("Subtotal", self.subtotal.as_str()),
            ("Shipping", self.shipping.as_str()),
            (self.tax_label.as_str(), self.tax.as_str()),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {:<14}{:>12}", label, value);
        }
        let _ = writeln!(out, "  {:<14}{:>12}", "Total", self.total);
    }
}

/// The cart screen.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartView {
    /// Nothing in the cart; no totals are shown.
    Empty {
        message: String,
        continue_shopping: Link,
    },
    Filled {
        lines: Vec<CartLineView>,
        summary: SummaryView,
        item_count: u64,
        checkout: Link,
        continue_shopping: Link,
    },
}

impl CartView {
    pub fn build(cart: &Cart, pricing: &CartPricing) -> Self {
        if cart.is_empty() {
            return CartView::Empty {
                message: EMPTY_CART.to_string(),
                continue_shopping: Link::continue_shopping(),
            };
        }

        let lines = cart
            .items
            .iter()
            .zip(&pricing.line_items)
            .map(|(item, priced)| CartLineView {
                product_id: item.product.id.to_string(),
                name: item.product.name.clone(),
                category: item.product.category.clone(),
                image: item.product.image.clone(),
                unit_price: priced.unit_price.display(),
                quantity: item.quantity,
                line_total: priced.line_total.display(),
                can_decrement: item.quantity > 1,
            })
            .collect();

        CartView::Filled {
            lines,
            summary: SummaryView::from_pricing(pricing),
            item_count: cart.item_count(),
            checkout: Link::checkout(),
            continue_shopping: Link::continue_shopping(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CartView::Empty { .. })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            CartView::Empty {
                message,
                continue_shopping,
            } => {
                let _ = writeln!(out, "{}", message);
                let _ = writeln!(out, "[{}] {}", continue_shopping.label, continue_shopping.href);
            }
            CartView::Filled {
                lines,
                summary,
                item_count,
                checkout,
                continue_shopping,
            } => {
                let _ = writeln!(out, "Shopping Cart ({} items)", item_count);
                for line in lines {
                    let category = line
                        .category
                        .as_deref()
                        .map(|c| format!(" [{}]", c))
                        .unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "  {} {}{}  {} x {} = {}",
                        line.product_id,
                        line.name,
                        category,
                        line.quantity,
                        line.unit_price,
                        line.line_total
                    );
                }
                out.push('\n');
                summary.render_into(&mut out);
                let _ = writeln!(out, "[{}] {}", checkout.label, checkout.href);
                let _ = writeln!(out, "[{}] {}", continue_shopping.label, continue_shopping.href);
            }
        }
        out
    }
}

/// The checkout screen's order summary and submit status.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckoutView {
    pub lines: Vec<CartLineView>,
    pub summary: Option<SummaryView>,
    /// Submit button is busy.
    pub submitting: bool,
    pub error: Option<String>,
}

impl CheckoutView {
    pub fn build(cart: &Cart, pricing: &CartPricing, state: &CheckoutState) -> Self {
        let (lines, summary) = match CartView::build(cart, pricing) {
            CartView::Filled { lines, summary, .. } => (lines, Some(summary)),
            CartView::Empty { .. } => (Vec::new(), None),
        };
        Self {
            lines,
            summary,
            submitting: state.is_submitting(),
            error: state.error_message().map(str::to_string),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Order Summary\n");
        if self.lines.is_empty() {
            let _ = writeln!(out, "  {}", EMPTY_CART);
        }
        for line in &self.lines {
            let _ = writeln!(out, "  {} x {}  {}", line.name, line.quantity, line.line_total);
        }
        if let Some(summary) = &self.summary {
            summary.render_into(&mut out);
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "Error: {}", error);
        }
        out
    }
}

/// One line of a confirmed order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: Option<String>,
}

/// The order confirmation screen.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationView {
    pub order_number: String,
    pub status: String,
    pub items: Vec<ConfirmationItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub recipient: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
    pub links: Vec<Link>,
}

impl ConfirmationView {
    pub fn build(order: &Order) -> Self {
        let currency = order.total.currency;
        let subtotal = order
            .items
            .iter()
            .map(|item| item.line_total())
            .try_fold(Money::zero(currency), |acc, line| acc.try_add(&line))
            .unwrap_or_else(|| Money::zero(currency));

        Self {
            order_number: order.order_number.clone(),
            status: order.status.display_name().to_string(),
            items: order
                .items
                .iter()
                .map(|item| ConfirmationItemView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price.display(),
                    line_total: item.line_total().display(),
                    image: item.image.clone(),
                })
                .collect(),
            subtotal: subtotal.display(),
            shipping: order.shipping_cost.display(),
            tax: order.tax.display(),
            total: order.total.display(),
            recipient: order.shipping_address.as_ref().map(|a| a.name.clone()),
            address: order.shipping_address.as_ref().map(|a| a.one_line()),
            phone: order
                .shipping_address
                .as_ref()
                .map(|a| a.phone.clone())
                .filter(|p| !p.trim().is_empty()),
            payment_method: order
                .payment_method
                .map(|m| m.display_name().to_string()),
            links: vec![Link::continue_shopping(), Link::cart(), Link::home()],
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Order placed successfully!");
        let _ = writeln!(out, "Order number: {}", self.order_number);
        let _ = writeln!(out, "Status: {}", self.status);
        out.push('\n');
        for item in &self.items {
            let _ = writeln!(
                out,
                "  {} x {} @ {} = {}",
                item.name, item.quantity, item.price, item.line_total
            );
        }
        out.push('\n');
        let rows = [
            ("Subtotal", &self.subtotal),
            ("Shipping", &self.shipping),
            ("Tax", &self.tax),
            ("Total", &self.total),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {:<14}{:>12}", label, value);
        }
        if let (Some(recipient), Some(address)) = (&self.recipient, &self.address) {
            let _ = writeln!(out, "\nShip to: {}, {}", recipient, address);
        }
        if let Some(phone) = &self.phone {
            let _ = writeln!(out, "Phone: {}", phone);
        }
        if let Some(payment) = &self.payment_method {
            let _ = writeln!(out, "Payment: {}", payment);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::cart::{LineItem, PricingPolicy, ProductRef};
    use turbo_commerce::money::Currency;

    fn view_of(lines: &[(&str, i64, u32)]) -> CartView {
        let cart = Cart::from_items(
            lines.iter().map(|(id, cents, qty)| {
                LineItem::new(
                    ProductRef::new(*id, format!("Product {}", id), Money::new(*cents, Currency::USD))
                        .with_category("Tools"),
                    *qty,
                )
                .unwrap()
            }),
            Currency::USD,
        );
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();
        CartView::build(&cart, &pricing)
    }

    #[test]
    fn test_empty_cart_view() {
        let view = view_of(&[]);
        assert!(view.is_empty());
        let text = view.render();
        assert!(text.contains("Your cart is empty"));
        assert!(text.contains("Continue Shopping"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_filled_cart_view() {
        match view_of(&[("A", 10000, 2)]) {
            CartView::Filled {
                lines,
                summary,
                item_count,
                ..
            } => {
                assert_eq!(item_count, 2);
                assert_eq!(lines[0].line_total, "$200.00");
                assert!(lines[0].can_decrement);
                assert_eq!(summary.shipping, FREE_SHIPPING_LABEL);
                assert_eq!(summary.tax_label, "Tax (10%)");
                assert_eq!(summary.total, "$220.00");
            }
            CartView::Empty { .. } => panic!("expected a filled cart"),
        }
    }

    #[test]
    fn test_flat_shipping_shown() {
        let view = view_of(&[("B", 1000, 1)]);
        let text = view.render();
        assert!(text.contains("$5.99"));
        assert!(text.contains("[Proceed to Checkout] /checkout"));
    }

    #[test]
    fn test_confirmation_view_of_placeholder() {
        let view = ConfirmationView::build(&Order::placeholder());
        assert_eq!(view.order_number, "ORD-123456789");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[1].line_total, "$1599.98");
        assert_eq!(view.subtotal, "$5099.97");
        assert_eq!(view.payment_method.as_deref(), Some("Credit Card"));
        assert_eq!(view.status, "Confirmed");

        let text = view.render();
        assert!(text.contains("Order number: ORD-123456789"));
        assert!(text.contains("Ship to: John Customer, 456 Customer Ave, New York, 10002, USA"));
    }

    #[test]
    fn test_checkout_view_carries_error() {
        let cart = Cart::new(Currency::USD);
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();
        let state = CheckoutState::Failed(EMPTY_CART.to_string());
        let view = CheckoutView::build(&cart, &pricing, &state);
        assert!(view.summary.is_none());
        assert_eq!(view.error.as_deref(), Some(EMPTY_CART));
        assert!(!view.submitting);
    }
}
