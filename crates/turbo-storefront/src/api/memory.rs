//! In-process `StoreApi`.

use super::StoreApi;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use turbo_commerce::cart::{Cart, LineItem, PricingPolicy, ProductRef, MAX_QUANTITY_PER_ITEM};
use turbo_commerce::checkout::{Order, OrderItem, OrderStatus, OrderSubmission};
use turbo_commerce::ids::{OrderId, ProductId};
use turbo_commerce::money::Currency;
use turbo_data::FetchError;

/// One call made against a [`MemoryStoreApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetCart,
    AddToCart(ProductId, u32),
    UpdateCartItem(ProductId, u32),
    RemoveCartItem(ProductId),
    ClearCart,
    CreateOrder(usize),
    GetOrder(OrderId),
    ListOrders,
}

impl ApiCall {
    /// Whether the call changes server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            ApiCall::GetCart | ApiCall::GetOrder(_) | ApiCall::ListOrders
        )
    }
}

#[derive(Debug, Default)]
struct State {
    catalog: HashMap<ProductId, ProductRef>,
    lines: Vec<(ProductId, u32)>,
    orders: Vec<Order>,
    calls: Vec<ApiCall>,
    fail_next: Vec<FetchError>,
}

/// A store that lives in memory: a product catalog, one cart, and the
/// orders created from it. Records every call it receives.
#[derive(Debug)]
pub struct MemoryStoreApi {
    state: Mutex<State>,
    pricing: PricingPolicy,
    currency: Currency,
}

impl Default for MemoryStoreApi {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

impl MemoryStoreApi {
    pub fn new(currency: Currency) -> Self {
        Self {
            state: Mutex::new(State::default()),
            pricing: PricingPolicy::default(),
            currency,
        }
    }

    /// Make a product known to the store.
    pub async fn add_product(&self, product: ProductRef) {
        self.state
            .lock()
            .await
            .catalog
            .insert(product.id.clone(), product);
    }

    /// Put a line straight into the server-side cart, bypassing validation.
    pub async fn seed_line(&self, product_id: impl Into<ProductId>, quantity: u32) {
        self.state.lock().await.lines.push((product_id.into(), quantity));
    }

    /// Fail the next call with `error`. Queued failures are used in order.
    pub async fn fail_next(&self, error: FetchError) {
        self.state.lock().await.fail_next.push(error);
    }

    /// Every call received so far.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn reset_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// Orders created so far.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }

    async fn record(&self, call: ApiCall) -> Result<tokio::sync::MutexGuard<'_, State>, FetchError> {
        let mut state = self.state.lock().await;
        state.calls.push(call);
        if state.fail_next.is_empty() {
            Ok(state)
        } else {
            Err(state.fail_next.remove(0))
        }
    }

    fn not_found(what: &str, id: &str) -> FetchError {
        FetchError::HttpError {
            status: 404,
            message: Some(format!("{} not found: {}", what, id)),
        }
    }

    fn cart_of(&self, state: &State) -> Cart {
        let items = state.lines.iter().filter_map(|(id, quantity)| {
            let product = state.catalog.get(id)?.clone();
            LineItem::new(product, *quantity).ok()
        });
        Cart::from_items(items, self.currency)
    }
}

#[async_trait]
impl StoreApi for MemoryStoreApi {
    async fn get_cart(&self) -> Result<Vec<LineItem>, FetchError> {
        let state = self.record(ApiCall::GetCart).await?;
        Ok(self.cart_of(&state).items)
    }

    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<(), FetchError> {
        let mut state = self
            .record(ApiCall::AddToCart(product_id.clone(), quantity))
            .await?;
        if !state.catalog.contains_key(product_id) {
            return Err(Self::not_found("Product", product_id.as_str()));
        }
        match state.lines.iter_mut().find(|(id, _)| id == product_id) {
            Some((_, existing)) => {
                *existing = existing.saturating_add(quantity).min(MAX_QUANTITY_PER_ITEM);
            }
            None => state.lines.push((product_id.clone(), quantity)),
        }
        Ok(())
    }

    async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), FetchError> {
        let mut state = self
            .record(ApiCall::UpdateCartItem(product_id.clone(), quantity))
            .await?;
        if !state.catalog.contains_key(product_id) {
            return Err(Self::not_found("Product", product_id.as_str()));
        }
        // The server upserts: updating a product not yet in the cart adds it.
        state.lines.retain(|(id, _)| id != product_id);
        state.lines.push((product_id.clone(), quantity));
        Ok(())
    }

    async fn remove_cart_item(&self, product_id: &ProductId) -> Result<(), FetchError> {
        let mut state = self
            .record(ApiCall::RemoveCartItem(product_id.clone()))
            .await?;
        state.lines.retain(|(id, _)| id != product_id);
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        let mut state = self.record(ApiCall::ClearCart).await?;
        state.lines.clear();
        Ok(())
    }

    async fn create_order(&self, submission: &OrderSubmission) -> Result<Order, FetchError> {
        let mut state = self
            .record(ApiCall::CreateOrder(submission.items.len()))
            .await?;

        let mut items = Vec::with_capacity(submission.items.len());
        let mut lines = Vec::with_capacity(submission.items.len());
        for item in &submission.items {
            let product = state
                .catalog
                .get(&item.product)
                .ok_or_else(|| Self::not_found("Product", item.product.as_str()))?;
            items.push(OrderItem {
                name: product.name.clone(),
                price: product.price,
                quantity: item.quantity,
                image: Some(product.image.clone()),
            });
            let line = LineItem::new(product.clone(), item.quantity).map_err(|e| {
                FetchError::HttpError {
                    status: 400,
                    message: Some(e.to_string()),
                }
            })?;
            lines.push(line);
        }

        let pricing = self
            .pricing
            .calculate(&Cart::from_items(lines, self.currency))
            .map_err(|e| FetchError::ApiError(e.to_string()))?;

        let number = state.orders.len() + 1;
        let order = Order {
            id: Some(OrderId::new(format!("order-{}", number))),
            order_number: format!("ORD-{:06}", number),
            items,
            shipping_address: Some(submission.shipping_address.clone()),
            payment_method: Some(submission.payment_method),
            status: OrderStatus::Pending,
            total: pricing.grand_total,
            shipping_cost: pricing.shipping_total,
            tax: pricing.tax_total,
        };
        state.orders.push(order.clone());
        state.lines.clear();
        Ok(order)
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        let state = self.record(ApiCall::GetOrder(id.clone())).await?;
        state
            .orders
            .iter()
            .find(|order| order.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found("Order", id.as_str()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, FetchError> {
        let state = self.record(ApiCall::ListOrders).await?;
        Ok(state.orders.clone())
    }
}
