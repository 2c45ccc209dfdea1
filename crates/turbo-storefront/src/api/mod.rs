//! The remote store API: cart and order endpoints.
//!
//! [`StoreApi`] is the seam between the storefront logic and the network.
//! [`HttpStoreApi`] talks to the real service; [`MemoryStoreApi`] keeps
//! everything in process and records each call.

mod http;
mod memory;
pub mod wire;

pub use http::HttpStoreApi;
pub use memory::{ApiCall, MemoryStoreApi};

use async_trait::async_trait;
use turbo_commerce::cart::LineItem;
use turbo_commerce::checkout::{Order, OrderSubmission};
use turbo_commerce::ids::{OrderId, ProductId};
use turbo_data::FetchError;

/// Cart and order operations of the remote store.
///
/// Every cart mutation only acknowledges; the authoritative cart is always
/// read back with [`StoreApi::get_cart`].
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// `GET /users/cart`
    async fn get_cart(&self) -> Result<Vec<LineItem>, FetchError>;

    /// `POST /users/cart`
    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<(), FetchError>;

    /// `PUT /users/cart/{productId}`
    async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), FetchError>;

    /// `DELETE /users/cart/{productId}`
    async fn remove_cart_item(&self, product_id: &ProductId) -> Result<(), FetchError>;

    /// `DELETE /users/cart`
    async fn clear_cart(&self) -> Result<(), FetchError>;

    /// `POST /orders`
    async fn create_order(&self, submission: &OrderSubmission) -> Result<Order, FetchError>;

    /// `GET /orders/{id}`
    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError>;

    /// `GET /orders`
    async fn list_orders(&self) -> Result<Vec<Order>, FetchError>;
}
