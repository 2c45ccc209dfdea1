//! Cart state held on the client, kept in step with the remote cart.
//!
//! The server owns the cart. Every mutation is sent, then the whole cart is
//! read back; nothing is changed locally ahead of the server.

use crate::api::StoreApi;
use crate::views::CartView;
use crate::StorefrontError;
use std::sync::Arc;
use turbo_commerce::cart::{validate_quantity, Cart, CartPricing, PricingPolicy};
use turbo_commerce::error::CommerceError;
use turbo_commerce::ids::ProductId;
use turbo_commerce::money::Currency;

/// Client-side cart state.
pub struct CartManager {
    api: Arc<dyn StoreApi>,
    pricing: PricingPolicy,
    cart: Cart,
    loading: bool,
    loaded: bool,
    last_error: Option<String>,
}

impl CartManager {
    pub fn new(api: Arc<dyn StoreApi>, pricing: PricingPolicy, currency: Currency) -> Self {
        Self {
            api,
            pricing,
            cart: Cart::new(currency),
            loading: false,
            loaded: false,
            last_error: None,
        }
    }

    /// The cart as of the last successful load.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether any load has succeeded yet.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Message of the last failed remote call, cleared by the next successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the cart and replace local state with it.
    ///
    /// On failure the previous cart stays (empty before the first load).
    pub async fn load(&mut self) -> Result<&Cart, StorefrontError> {
        self.loading = true;
        let result = self.api.get_cart().await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.cart = Cart::from_items(items, self.cart.currency);
                self.loaded = true;
                self.last_error = None;
                tracing::debug!(lines = self.cart.unique_item_count(), "cart loaded");
                Ok(&self.cart)
            }
            Err(e) => Err(self.failed("load cart", e.into())),
        }
    }

    /// Set a line's quantity. Quantities below 1 are rejected without a call.
    pub async fn add_or_update(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StorefrontError> {
        let quantity = validate_quantity(quantity)?;
        let result = self.api.update_cart_item(product_id, quantity).await;
        self.after_mutation("update quantity", product_id, result).await
    }

    /// Raise a line's quantity by one.
    pub async fn increment(&mut self, product_id: &ProductId) -> Result<(), StorefrontError> {
        let current = self.current_quantity(product_id)?;
        self.add_or_update(product_id, i64::from(current) + 1).await
    }

    /// Lower a line's quantity by one. At quantity 1 this is rejected without a call.
    pub async fn decrement(&mut self, product_id: &ProductId) -> Result<(), StorefrontError> {
        let current = self.current_quantity(product_id)?;
        self.add_or_update(product_id, i64::from(current) - 1).await
    }

    /// Whether `decrement` would be sent (the minus button is enabled).
    pub fn can_decrement(&self, product_id: &ProductId) -> bool {
        self.cart.quantity_of(product_id).is_some_and(|q| q > 1)
    }

    /// Add `quantity` of a product, on top of any existing line.
    pub async fn add(&mut self, product_id: &ProductId, quantity: i64) -> Result<(), StorefrontError> {
        let quantity = validate_quantity(quantity)?;
        let result = self.api.add_to_cart(product_id, quantity).await;
        self.after_mutation("add to cart", product_id, result).await
    }

    /// Remove a line entirely.
    pub async fn remove(&mut self, product_id: &ProductId) -> Result<(), StorefrontError> {
        let result = self.api.remove_cart_item(product_id).await;
        self.after_mutation("remove item", product_id, result).await
    }

    /// Empty the cart.
    pub async fn clear(&mut self) -> Result<(), StorefrontError> {
        let result = self.api.clear_cart().await;
        match result {
            Ok(()) => {
                tracing::info!("cart cleared");
                self.load().await.map(|_| ())
            }
            Err(e) => Err(self.failed("clear cart", e.into())),
        }
    }

    /// Totals of the current cart.
    pub fn pricing(&self) -> Result<CartPricing, StorefrontError> {
        Ok(self.pricing.calculate(&self.cart)?)
    }

    /// Display model of the current cart.
    pub fn view(&self) -> Result<CartView, StorefrontError> {
        Ok(CartView::build(&self.cart, &self.pricing()?))
    }

    fn current_quantity(&self, product_id: &ProductId) -> Result<u32, StorefrontError> {
        self.cart
            .quantity_of(product_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()).into())
    }

    async fn after_mutation(
        &mut self,
        action: &'static str,
        product_id: &ProductId,
        result: Result<(), turbo_data::FetchError>,
    ) -> Result<(), StorefrontError> {
        match result {
            Ok(()) => {
                tracing::info!(product = %product_id, action, "cart updated");
                self.load().await.map(|_| ())
            }
            Err(e) => Err(self.failed(action, e.into())),
        }
    }

    fn failed(&mut self, action: &str, error: StorefrontError) -> StorefrontError {
        tracing::error!(action, error = %error, "cart request failed");
        self.last_error = Some(error.user_message());
        error
    }
}
