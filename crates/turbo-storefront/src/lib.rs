//! Cart and checkout client for the TurboCommerce store API.
//!
//! - [`CartManager`] keeps the client's view of the cart, reloading it
//!   from the server after every change
//! - [`OrderAssembler`] validates the checkout form and submits the order
//! - [`confirmation::resolve_confirmation`] picks the order to confirm
//! - [`views`] turns all of the above into display models
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use turbo_auth::{AuthSession, SessionContext};
//! use turbo_commerce::prelude::*;
//! use turbo_storefront::prelude::*;
//!
//! # async fn run() -> Result<(), StorefrontError> {
//! let config = StorefrontConfig::default();
//! let session = SessionContext::signed_in(AuthSession::new("token")?);
//! let api = Arc::new(HttpStoreApi::from_config(&config, session)?);
//!
//! let mut cart = CartManager::new(api.clone(), config.pricing.policy(), Currency::USD);
//! cart.load().await?;
//! cart.add_or_update(&ProductId::new("A"), 2).await?;
//!
//! let mut checkout = OrderAssembler::new(api, config.checkout.clone());
//! let address = ShippingAddress::new("Jane Doe", "1 Main St", "Boston", "USA");
//! let order = checkout
//!     .submit(cart.cart(), &address, &PaymentSelection::default())
//!     .await?;
//! println!("{}", order.order_number);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod cart_manager;
pub mod config;
pub mod confirmation;
mod error;
mod order_assembler;
pub mod views;

pub use api::{HttpStoreApi, MemoryStoreApi, StoreApi};
pub use cart_manager::CartManager;
pub use config::StorefrontConfig;
pub use error::{StorefrontError, ORDER_FAILED};
pub use order_assembler::OrderAssembler;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{HttpStoreApi, StoreApi};
    pub use crate::config::StorefrontConfig;
    pub use crate::confirmation::resolve_confirmation;
    pub use crate::views::{CartView, CheckoutView, ConfirmationView};
    pub use crate::{CartManager, OrderAssembler, StorefrontError};
}
