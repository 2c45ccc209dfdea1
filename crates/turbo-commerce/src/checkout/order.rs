//! Order submission payload and created orders.

use crate::cart::Cart;
use crate::checkout::{PaymentMethod, PaymentSelection, ShippingAddress};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping method sent with every order.
pub const DEFAULT_SHIPPING_METHOD: &str = "standard";

/// Notes sent with every order.
pub const DEFAULT_ORDER_NOTES: &str = "Order from website";

/// One product line of an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionItem {
    /// Product id.
    pub product: ProductId,
    /// Quantity ordered.
    pub quantity: u32,
}

/// Payload for the order-creation endpoint.
///
/// Built fresh from the cart and the checkout form at submit time; never
/// stored. Payment carries only the method code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub items: Vec<SubmissionItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_method: String,
    pub notes: String,
}

impl OrderSubmission {
    /// Validate the form and cart, then build the payload.
    ///
    /// The address is checked before the cart.
    pub fn assemble(
        cart: &Cart,
        shipping_address: &ShippingAddress,
        payment: &PaymentSelection,
        shipping_method: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        shipping_address.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            items: cart
                .items
                .iter()
                .map(|item| SubmissionItem {
                    product: item.product.id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address: shipping_address.clone(),
            payment_method: payment.method,
            shipping_method: shipping_method.into(),
            notes: notes.into(),
        })
    }
}

/// Order status as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a status string; anything unknown is `Pending`.
    pub fn parse_lossy(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "confirmed" => OrderStatus::Confirmed,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

/// A line of a created order, as priced by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub image: Option<String>,
}

impl OrderItem {
    /// price * quantity, saturating.
    pub fn line_total(&self) -> Money {
        Money::new(
            self.price.amount_cents.saturating_mul(i64::from(self.quantity)),
            self.price.currency,
        )
    }
}

/// An order created by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Server id, when the service returned one.
    pub id: Option<OrderId>,
    /// Human-readable order number.
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub status: OrderStatus,
    /// Amount charged.
    pub total: Money,
    pub shipping_cost: Money,
    pub tax: Money,
}

impl Order {
    /// The fixed order shown when the confirmation step is reached without
    /// an order.
    pub fn placeholder() -> Self {
        let usd = |amount: f64| Money::from_decimal(amount, Currency::USD);
        Self {
            id: None,
            order_number: "ORD-123456789".to_string(),
            items: vec![
                OrderItem {
                    name: "MacBook Pro 16-inch".to_string(),
                    price: usd(3499.99),
                    quantity: 1,
                    image: Some(
                        "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=100&h=100&fit=crop"
                            .to_string(),
                    ),
                },
                OrderItem {
                    name: "Apple Watch Ultra 2".to_string(),
                    price: usd(799.99),
                    quantity: 2,
                    image: Some(
                        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=100&h=100&fit=crop"
                            .to_string(),
                    ),
                },
            ],
            shipping_address: Some(
                ShippingAddress::new("John Customer", "456 Customer Ave", "New York", "USA")
                    .with_zip_code("10002")
                    .with_phone("+1234567891"),
            ),
            payment_method: Some(PaymentMethod::CreditCard),
            status: OrderStatus::Confirmed,
            total: usd(5297.97),
            shipping_cost: usd(12.99),
            tax: usd(45.60),
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}
