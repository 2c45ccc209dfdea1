//! Turns a cart and the checkout form into an order.

use crate::api::StoreApi;
use crate::config::CheckoutConfig;
use crate::StorefrontError;
use std::sync::Arc;
use turbo_commerce::cart::Cart;
use turbo_commerce::checkout::{
    CheckoutState, Order, OrderSubmission, PaymentSelection, ShippingAddress,
};
use turbo_commerce::error::CommerceError;

/// Validates the checkout form, submits the order and tracks the outcome.
pub struct OrderAssembler {
    api: Arc<dyn StoreApi>,
    checkout: CheckoutConfig,
    state: CheckoutState,
}

impl OrderAssembler {
    pub fn new(api: Arc<dyn StoreApi>, checkout: CheckoutConfig) -> Self {
        Self {
            api,
            checkout,
            state: CheckoutState::Idle,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Build the payload without submitting it.
    pub fn assemble(
        &self,
        cart: &Cart,
        address: &ShippingAddress,
        payment: &PaymentSelection,
    ) -> Result<OrderSubmission, CommerceError> {
        OrderSubmission::assemble(
            cart,
            address,
            payment,
            self.checkout.shipping_method.as_str(),
            self.checkout.notes.as_str(),
        )
    }

    /// Validate and submit.
    ///
    /// Validation failures never reach the network. Any failure leaves the
    /// state `Failed(message)`, from which a new submit is allowed.
    pub async fn submit(
        &mut self,
        cart: &Cart,
        address: &ShippingAddress,
        payment: &PaymentSelection,
    ) -> Result<Order, StorefrontError> {
        if !self.state.can_submit() {
            let err = if self.state.is_submitting() {
                CommerceError::SubmissionInProgress
            } else {
                CommerceError::InvalidCheckoutTransition {
                    from: self.state.as_str().to_string(),
                    to: "submitting".to_string(),
                }
            };
            return Err(err.into());
        }

        let submission = match self.assemble(cart, address, payment) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(error = %e, "order rejected before submission");
                self.state.fail(e.to_string())?;
                return Err(e.into());
            }
        };

        self.state.begin()?;
        tracing::debug!(
            payload = %serde_json::to_string(&submission).unwrap_or_default(),
            "submitting order"
        );

        match self.api.create_order(&submission).await {
            Ok(order) => {
                tracing::info!(order_number = %order.order_number, "order created");
                self.state.succeed(order.clone())?;
                Ok(order)
            }
            Err(e) => {
                let error = StorefrontError::from(e);
                let message = error.user_message();
                tracing::error!(error = %error, "order submission failed");
                self.state.fail(message)?;
                Err(error)
            }
        }
    }

    /// Back to `Idle`, e.g. when the checkout form is opened again.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, MemoryStoreApi};
    use crate::error::ORDER_FAILED;
    use turbo_commerce::cart::{LineItem, ProductRef};
    use turbo_commerce::checkout::{OrderStatus, PaymentMethod};
    use turbo_commerce::error::{EMPTY_CART, MISSING_SHIPPING_FIELDS};
    use turbo_commerce::money::{Currency, Money};
    use turbo_data::FetchError;

    fn widget() -> ProductRef {
        ProductRef::new("A", "Widget", Money::new(10000, Currency::USD))
    }

    fn cart() -> Cart {
        Cart::from_items(vec![LineItem::new(widget(), 2).unwrap()], Currency::USD)
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new("Jane Doe", "1 Main St", "Boston", "USA")
    }

    async fn setup() -> (Arc<MemoryStoreApi>, OrderAssembler) {
        let store = Arc::new(MemoryStoreApi::default());
        store.add_product(widget()).await;
        let assembler = OrderAssembler::new(store.clone(), CheckoutConfig::default());
        (store, assembler)
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let (store, mut assembler) = setup().await;
        let order = assembler
            .submit(&cart(), &address(), &PaymentSelection::default())
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(assembler.state().order(), Some(&order));
        assert_eq!(store.calls().await, vec![ApiCall::CreateOrder(1)]);
    }

    #[tokio::test]
    async fn test_empty_cart_fails_locally() {
        let (store, mut assembler) = setup().await;
        let err = assembler
            .submit(&Cart::new(Currency::USD), &address(), &PaymentSelection::default())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(assembler.state().error_message(), Some(EMPTY_CART));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_address_fields_fail_locally() {
        let (store, mut assembler) = setup().await;
        for blank in ["name", "street", "city", "country"] {
            let mut address = address();
            match blank {
                "name" => address.name = "  ".to_string(),
                "street" => address.street.clear(),
                "city" => address.city.clear(),
                _ => address.country.clear(),
            }
            let err = assembler
                .submit(&cart(), &address, &PaymentSelection::default())
                .await
                .unwrap_err();
            assert_eq!(err.user_message(), MISSING_SHIPPING_FIELDS);
            assert!(assembler.state().can_submit());
        }
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_uses_server_message_and_allows_retry() {
        let (store, mut assembler) = setup().await;
        store
            .fail_next(FetchError::HttpError {
                status: 400,
                message: Some("Widget is out of stock".to_string()),
            })
            .await;

        let payment = PaymentSelection::new(PaymentMethod::Paypal);
        assert!(assembler.submit(&cart(), &address(), &payment).await.is_err());
        assert_eq!(
            assembler.state().error_message(),
            Some("Widget is out of stock")
        );

        let order = assembler.submit(&cart(), &address(), &payment).await.unwrap();
        assert_eq!(order.payment_method, Some(PaymentMethod::Paypal));
        assert_eq!(store.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_without_server_message() {
        let (store, mut assembler) = setup().await;
        store.fail_next(FetchError::Timeout).await;
        let _ = assembler
            .submit(&cart(), &address(), &PaymentSelection::default())
            .await;
        assert_eq!(assembler.state().error_message(), Some("Request timed out"));
    }

    #[tokio::test]
    async fn test_no_resubmit_after_success_until_reset() {
        let (_store, mut assembler) = setup().await;
        let payment = PaymentSelection::default();
        assembler.submit(&cart(), &address(), &payment).await.unwrap();

        let err = assembler.submit(&cart(), &address(), &payment).await.unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Commerce(CommerceError::InvalidCheckoutTransition { .. })
        ));

        assembler.reset();
        assert!(assembler.submit(&cart(), &address(), &payment).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_server_message_falls_back() {
        let (store, mut assembler) = setup().await;
        store.fail_next(FetchError::ApiError(String::new())).await;
        let _ = assembler
            .submit(&cart(), &address(), &PaymentSelection::default())
            .await;
        assert_eq!(assembler.state().error_message(), Some(ORDER_FAILED));
    }

    #[tokio::test]
    async fn test_assemble_uses_configured_defaults() {
        let (_store, assembler) = setup().await;
        let submission = assembler
            .assemble(&cart(), &address(), &PaymentSelection::default())
            .unwrap();
        assert_eq!(submission.shipping_method, "standard");
        assert_eq!(submission.notes, "Order from website");
    }
}
