//! Cart pricing calculations.
//!
//! One policy prices every view of the cart: the cart summary and the
//! checkout summary must never disagree about shipping or tax.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping fee rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Orders whose subtotal is strictly above this ship free.
    /// `None` disables free shipping.
    pub free_threshold_cents: Option<i64>,
    /// Fee charged otherwise.
    pub flat_rate_cents: i64,
}

impl ShippingPolicy {
    /// Free over $50.00, else $5.99.
    pub const STANDARD: ShippingPolicy = ShippingPolicy {
        free_threshold_cents: Some(5000),
        flat_rate_cents: 599,
    };

    /// Always free: no fee and no threshold to clear.
    pub const FREE: ShippingPolicy = ShippingPolicy {
        free_threshold_cents: None,
        flat_rate_cents: 0,
    };

    /// Shipping fee for a subtotal. An empty cart ships nothing and costs nothing.
    pub fn fee_for(&self, subtotal: Money, is_empty: bool) -> Money {
        if is_empty {
            return Money::zero(subtotal.currency);
        }
        match self.free_threshold_cents {
            Some(threshold) if subtotal.amount_cents > threshold => Money::zero(subtotal.currency),
            _ => Money::new(self.flat_rate_cents.max(0), subtotal.currency),
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Tax and shipping rules applied to a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Tax rate in basis points (1000 = 10%).
    pub tax_rate_bps: u32,
    /// Shipping fee rule.
    pub shipping: ShippingPolicy,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate_bps: 1000,
            shipping: ShippingPolicy::STANDARD,
        }
    }
}

impl PricingPolicy {
    /// Sum of price times quantity over every line.
    pub fn subtotal(&self, cart: &Cart) -> Result<Money, CommerceError> {
        let line_totals = cart
            .items
            .iter()
            .map(|item| item.line_total())
            .collect::<Result<Vec<_>, _>>()?;
        sum(&line_totals, cart.currency)
    }

    /// Tax on a subtotal, rounded half-up to the minor unit.
    pub fn tax(&self, subtotal: Money) -> Result<Money, CommerceError> {
        subtotal
            .try_apply_rate_bps(self.tax_rate_bps)
            .ok_or(CommerceError::Overflow)
    }

    /// Shipping fee for a cart with the given subtotal.
    pub fn shipping(&self, cart: &Cart, subtotal: Money) -> Money {
        self.shipping.fee_for(subtotal, cart.is_empty())
    }

    /// Calculate the full pricing breakdown for a cart.
    pub fn calculate(&self, cart: &Cart) -> Result<CartPricing, CommerceError> {
        let line_items = cart
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    product_id: item.product.id.clone(),
                    unit_price: item.product.price,
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = sum(
            &line_items.iter().map(|l| l.line_total).collect::<Vec<_>>(),
            cart.currency,
        )?;
        let tax_total = self.tax(subtotal)?;
        let shipping_total = self.shipping(cart, subtotal);
        let grand_total = sum(&[subtotal, tax_total, shipping_total], cart.currency)?;

        Ok(CartPricing {
            subtotal,
            tax_total,
            shipping_total,
            grand_total,
            tax_rate_bps: self.tax_rate_bps,
            line_items,
        })
    }
}

fn sum(values: &[Money], currency: Currency) -> Result<Money, CommerceError> {
    if let Some(other) = values.iter().find(|m| m.currency != currency) {
        return Err(CommerceError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: other.currency.code().to_string(),
        });
    }
    Money::try_sum(values.iter(), currency).ok_or(CommerceError::Overflow)
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// subtotal + tax + shipping.
    pub grand_total: Money,
    /// Tax rate the totals were computed with.
    pub tax_rate_bps: u32,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Whether shipping is free for this cart.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }

    /// Tax rate as a whole-number percentage label, e.g. "10%".
    pub fn tax_rate_label(&self) -> String {
        if self.tax_rate_bps % 100 == 0 {
            format!("{}%", self.tax_rate_bps / 100)
        } else {
            format!("{:.2}%", f64::from(self.tax_rate_bps) / 100.0)
        }
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product on the line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{LineItem, ProductRef};

    fn cart_of(lines: &[(&str, i64, u32)]) -> Cart {
        Cart::from_items(
            lines.iter().map(|(id, cents, qty)| {
                LineItem::new(
                    ProductRef::new(*id, *id, Money::new(*cents, Currency::USD)),
                    *qty,
                )
                .unwrap()
            }),
            Currency::USD,
        )
    }

    #[test]
    fn test_single_line_scenario() {
        let cart = cart_of(&[("A", 10000, 2)]);
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();

        assert_eq!(pricing.subtotal.display_amount(), "200.00");
        assert_eq!(pricing.tax_total.display_amount(), "20.00");
        assert_eq!(pricing.shipping_total.display_amount(), "0.00");
        assert_eq!(pricing.grand_total.display_amount(), "220.00");
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let cart = Cart::new(Currency::USD);
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();

        assert!(pricing.subtotal.is_zero());
        assert!(pricing.tax_total.is_zero());
        assert!(pricing.shipping_total.is_zero());
        assert!(pricing.grand_total.is_zero());
        assert!(pricing.line_items.is_empty());
    }

    #[test]
    fn test_flat_shipping_at_or_below_threshold() {
        // Exactly $50.00 is not strictly above the threshold
        let cart = cart_of(&[("A", 2500, 2)]);
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();
        assert_eq!(pricing.shipping_total.amount_cents, 599);
        assert_eq!(pricing.grand_total.amount_cents, 5000 + 500 + 599);

        let cart = cart_of(&[("A", 5001, 1)]);
        let pricing = PricingPolicy::default().calculate(&cart).unwrap();
        assert!(pricing.has_free_shipping());
    }

    #[test]
    fn test_free_policy() {
        let policy = PricingPolicy {
            tax_rate_bps: 1000,
            shipping: ShippingPolicy::FREE,
        };
        assert_eq!(ShippingPolicy::FREE.free_threshold_cents, None);
        for cents in [1, 5000, 500_000] {
            let pricing = policy.calculate(&cart_of(&[("A", cents, 1)])).unwrap();
            assert!(pricing.shipping_total.is_zero());
        }
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let carts = [
            cart_of(&[]),
            cart_of(&[("A", 1, 1)]),
            cart_of(&[("A", 333, 3), ("B", 1999, 7)]),
            cart_of(&[("A", 0, 4), ("B", 4999, 1)]),
            cart_of(&[("A", 12345, 9999)]),
        ];

        for policy in [
            PricingPolicy::default(),
            PricingPolicy {
                tax_rate_bps: 825,
                shipping: ShippingPolicy::FREE,
            },
        ] {
            for cart in &carts {
                let p = policy.calculate(cart).unwrap();
                assert_eq!(
                    p.grand_total.amount_cents,
                    p.subtotal.amount_cents + p.tax_total.amount_cents + p.shipping_total.amount_cents
                );
                assert!(!p.grand_total.is_negative());
            }
        }
    }

    #[test]
    fn test_zero_price_line_counts_as_zero() {
        let cart = cart_of(&[("free", 0, 3), ("B", 1000, 1)]);
        let policy = PricingPolicy::default();
        assert_eq!(policy.subtotal(&cart).unwrap().amount_cents, 1000);
    }

    #[test]
    fn test_overflow_is_reported() {
        let cart = cart_of(&[("A", i64::MAX / 2, 3)]);
        assert_eq!(
            PricingPolicy::default().calculate(&cart),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_tax_rate_label() {
        let pricing = PricingPolicy::default()
            .calculate(&cart_of(&[("A", 100, 1)]))
            .unwrap();
        assert_eq!(pricing.tax_rate_label(), "10%");
    }
}
