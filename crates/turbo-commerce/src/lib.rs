//! Cart, pricing and checkout domain types for the TurboCommerce storefront client.
//!
//! Everything in this crate is pure: no I/O, no clocks beyond id generation.
//!
//! - **Cart**: line items keyed by product, derived pricing
//! - **Checkout**: shipping address, payment selection, order submission payload,
//!   submit state machine and created orders
//!
//! # Example
//!
//! ```
//! use turbo_commerce::prelude::*;
//!
//! let product = ProductRef::new("A", "Widget", Money::new(10000, Currency::USD));
//! let cart = Cart::from_items(vec![LineItem::new(product, 2).unwrap()], Currency::USD);
//!
//! let pricing = PricingPolicy::default().calculate(&cart).unwrap();
//! assert_eq!(pricing.subtotal.display(), "$200.00");
//! assert_eq!(pricing.tax_total.display(), "$20.00");
//! assert_eq!(pricing.shipping_total.display(), "$0.00");
//! assert_eq!(pricing.grand_total.display(), "$220.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartPricing, LineItem, LineItemPricing, PricingPolicy, ProductRef, ShippingPolicy,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutState, Order, OrderItem, OrderStatus, OrderSubmission, PaymentMethod,
        PaymentSelection, ShippingAddress, SubmissionItem,
    };
}
