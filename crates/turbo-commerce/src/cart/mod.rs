//! Shopping cart module.
//!
//! Contains the cart, its line items and the pricing calculator.

mod cart;
mod pricing;

pub use cart::{
    validate_quantity, Cart, LineItem, ProductRef, MAX_QUANTITY_PER_ITEM, PLACEHOLDER_IMAGE,
};
pub use pricing::{CartPricing, LineItemPricing, PricingPolicy, ShippingPolicy};
