//! `StoreApi` over HTTP.

use super::wire::{self, AddToCartBody, UpdateQuantityBody, WireCart, WireOrder};
use super::StoreApi;
use crate::config::StorefrontConfig;
use crate::StorefrontError;
use async_trait::async_trait;
use turbo_auth::SessionContext;
use turbo_commerce::cart::LineItem;
use turbo_commerce::checkout::{Order, OrderSubmission};
use turbo_commerce::ids::{OrderId, ProductId};
use turbo_commerce::money::Currency;
use turbo_data::{ClientRequestBuilder, FetchClient, FetchError, Response};
use turbo_observability::{RequestId, REQUEST_ID_HEADER};

const CART_PATH: &str = "/users/cart";
const ORDERS_PATH: &str = "/orders";

/// The store API reached over HTTP.
///
/// Sends the session's bearer token (when signed in) and a fresh
/// `X-Request-Id` with every call. A 401 signs the session out.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    client: FetchClient,
    session: SessionContext,
    currency: Currency,
}

impl HttpStoreApi {
    pub fn new(client: FetchClient, session: SessionContext, currency: Currency) -> Self {
        Self {
            client,
            session,
            currency,
        }
    }

    /// Build the client from configuration.
    pub fn from_config(
        config: &StorefrontConfig,
        session: SessionContext,
    ) -> Result<Self, StorefrontError> {
        config.validate()?;
        let client = FetchClient::new(config.api.base_url.clone(), config.api.timeout())?
            .with_default_header("Accept", "application/json")
            .with_default_header("Content-Type", "application/json");
        Ok(Self::new(client, session, config.pricing.currency()?))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn send(&self, request: ClientRequestBuilder<'_>) -> Result<Response, FetchError> {
        let request_id = RequestId::generate();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(token) = self.session.bearer_token().await {
            request = request.bearer_auth(token);
        }

        tracing::debug!(
            request_id = %request_id,
            method = request.as_request().method().as_str(),
            url = request.as_request().url(),
            "sending"
        );

        match request.send().await?.error_for_status() {
            Err(err @ FetchError::Unauthorized { .. }) => {
                self.session.invalidate().await;
                Err(err)
            }
            other => other,
        }
    }

    /// Send and require a successful envelope; the payload is ignored.
    async fn acknowledge(&self, request: ClientRequestBuilder<'_>) -> Result<(), FetchError> {
        self.send(request)
            .await?
            .envelope::<serde_json::Value>()
            .map(|_| ())
    }

    fn order_from(&self, response: Response) -> Result<Order, FetchError> {
        let order = response
            .envelope::<WireOrder>()?
            .ok_or_else(|| FetchError::ParseError("response carried no order".to_string()))?;
        Ok(order.into_order(self.currency))
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_cart(&self) -> Result<Vec<LineItem>, FetchError> {
        let response = self.send(self.client.get(CART_PATH)).await?;
        Ok(wire::cart_lines(response.envelope::<WireCart>()?, self.currency))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<(), FetchError> {
        let body = AddToCartBody {
            product_id: product_id.as_str(),
            quantity,
        };
        self.acknowledge(self.client.post(CART_PATH).json(&body)?)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), FetchError> {
        let request = self
            .client
            .put(wire::cart_item_path(product_id))
            .json(&UpdateQuantityBody { quantity })?;
        self.acknowledge(request).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove_cart_item(&self, product_id: &ProductId) -> Result<(), FetchError> {
        self.acknowledge(self.client.delete(wire::cart_item_path(product_id)))
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn clear_cart(&self) -> Result<(), FetchError> {
        self.acknowledge(self.client.delete(CART_PATH)).await
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn create_order(&self, submission: &OrderSubmission) -> Result<Order, FetchError> {
        let response = self
            .send(self.client.post(ORDERS_PATH).json(submission)?)
            .await?;
        self.order_from(response)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        let response = self.send(self.client.get(wire::order_path(id))).await?;
        self.order_from(response)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, FetchError> {
        let response = self.send(self.client.get(ORDERS_PATH)).await?;
        Ok(response
            .envelope::<Vec<WireOrder>>()?
            .unwrap_or_default()
            .into_iter()
            .map(|order| order.into_order(self.currency))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use turbo_auth::AuthSession;

    /// Serve one canned response; the handle yields the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    fn api(base_url: &str, session: SessionContext) -> HttpStoreApi {
        let client = FetchClient::new(base_url, Duration::from_secs(5)).unwrap();
        HttpStoreApi::new(client, session, Currency::USD)
    }

    #[tokio::test]
    async fn test_get_cart_sends_auth_and_request_id() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"success":true,"data":[{"product":{"_id":"A","name":"Widget","price":100},"quantity":2}]}"#,
        )
        .await;
        let session = SessionContext::signed_in(AuthSession::new("tok-123").unwrap());

        let lines = api(&url, session).get_cart().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /users/cart "));
        assert!(request.contains("authorization: bearer tok-123"));
        assert!(request.contains("x-request-id: req_"));
    }

    #[tokio::test]
    async fn test_update_sends_quantity_body() {
        let (url, server) = serve_once("200 OK", r#"{"success":true}"#).await;
        api(&url, SessionContext::new())
            .update_cart_item(&ProductId::new("A"), 3)
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /users/cart/A "));
        assert!(request.ends_with(r#"{"quantity":3}"#));
        assert!(!request.to_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn test_unauthorized_signs_out() {
        let (url, _server) = serve_once("401 Unauthorized", r#"{"message":"jwt expired"}"#).await;
        let session = SessionContext::signed_in(AuthSession::new("old").unwrap());

        let err = api(&url, session.clone()).get_cart().await.unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized { .. }));
        assert!(!session.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_create_order_server_message() {
        let (url, _server) = serve_once(
            "400 Bad Request",
            r#"{"success":false,"message":"Widget is out of stock"}"#,
        )
        .await;
        let submission: OrderSubmission = serde_json::from_value(serde_json::json!({
            "items": [{"product": "A", "quantity": 1}],
            "shippingAddress": {"name": "J", "street": "S", "city": "C", "country": "USA"},
            "paymentMethod": "credit_card",
            "shippingMethod": "standard",
            "notes": "Order from website"
        }))
        .unwrap();

        let err = api(&url, SessionContext::new())
            .create_order(&submission)
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Widget is out of stock"));
    }

    #[tokio::test]
    async fn test_created_order_with_null_address_fields() {
        let (url, _server) = serve_once(
            "201 Created",
            r#"{"success":true,"data":{"_id":"o9","id":"o9","orderNumber":"ORD-9",
                "shippingAddress":{"name":"J","street":"S","city":"C","country":"USA",
                                   "zipCode":null,"phone":null},
                "paymentMethod":"credit_card","orderStatus":"pending","totalAmount":110}}"#,
        )
        .await;
        let submission: OrderSubmission = serde_json::from_value(serde_json::json!({
            "items": [{"product": "A", "quantity": 1}],
            "shippingAddress": {"name": "J", "street": "S", "city": "C", "country": "USA"},
            "paymentMethod": "credit_card",
            "shippingMethod": "standard",
            "notes": "Order from website"
        }))
        .unwrap();

        let order = api(&url, SessionContext::new())
            .create_order(&submission)
            .await
            .unwrap();
        assert_eq!(order.order_number, "ORD-9");
        assert_eq!(order.shipping_address.unwrap().zip_code, "");
    }

    #[tokio::test]
    async fn test_remove_encodes_product_id() {
        let (url, server) = serve_once("200 OK", "").await;
        api(&url, SessionContext::new())
            .remove_cart_item(&ProductId::new("a/b"))
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /users/cart/a%2Fb "));
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_error() {
        let (url, _server) = serve_once("200 OK", r#"{"success":false,"message":"Cart locked"}"#).await;
        let err = api(&url, SessionContext::new()).clear_cart().await.unwrap_err();
        assert_eq!(err, FetchError::ApiError("Cart locked".to_string()));
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = StorefrontConfig::default();
        config.api.base_url = "ftp://x".to_string();
        assert!(HttpStoreApi::from_config(&config, SessionContext::new()).is_err());
    }
}
