//! JSON shapes of the store API and their conversion into domain types.
//!
//! Decoding is loose: missing fields take typed defaults,
//! numbers may arrive as strings, and products may be populated objects or
//! bare ids. Anything coerced is logged at `warn`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_commerce::cart::{LineItem, ProductRef, MAX_QUANTITY_PER_ITEM};
use turbo_commerce::checkout::{Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress};
use turbo_commerce::ids::{OrderId, ProductId};
use turbo_commerce::money::{Currency, Money};

/// Body of `POST /users/cart`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
}

/// Body of `PUT /users/cart/{productId}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateQuantityBody {
    pub quantity: u32,
}

/// `data` of `GET /users/cart`: a list of lines, or an object holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireCart {
    Lines(Vec<WireCartLine>),
    Wrapped {
        #[serde(default)]
        items: Vec<WireCartLine>,
    },
}

impl WireCart {
    pub fn into_lines(self) -> Vec<WireCartLine> {
        match self {
            WireCart::Lines(lines) | WireCart::Wrapped { items: lines } => lines,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCartLine {
    #[serde(default)]
    pub product: Option<WireProductField>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

/// A product as an object, or just its id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireProductField {
    Id(String),
    Product(WireProduct),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    /// A plain label or a populated `{name}` object.
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub brand: Option<Value>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl WireProduct {
    fn id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }

    fn image(&self) -> Option<&str> {
        self.featured_image.as_deref().or(self.image.as_deref())
    }
}

impl WireProductField {
    fn id(&self) -> Option<&str> {
        let id = match self {
            WireProductField::Id(id) => Some(id.as_str()),
            WireProductField::Product(p) => p.id(),
        };
        id.filter(|id| !id.trim().is_empty())
    }

    /// Build the product reference. `None` when there is no usable id.
    pub fn to_product(&self, currency: Currency) -> Option<ProductRef> {
        let id = self.id()?;
        let product = match self {
            WireProductField::Id(_) => ProductRef::new(id, "", Money::zero(currency)),
            WireProductField::Product(p) => {
                let price = p.price.as_ref().and_then(number).unwrap_or_else(|| {
                    tracing::warn!(product = id, "product has no price, using 0");
                    0.0
                });
                let mut product = ProductRef::new(
                    id,
                    p.name.clone().unwrap_or_default(),
                    Money::from_decimal(price, currency),
                );
                if let Some(category) = p.category.as_ref().and_then(label) {
                    product = product.with_category(category);
                }
                if let Some(brand) = p.brand.as_ref().and_then(label) {
                    product = product.with_brand(brand);
                }
                if let Some(image) = p.image() {
                    product = product.with_image(image);
                }
                product
            }
        };
        Some(product)
    }
}

impl WireCartLine {
    /// Convert to a line item. Lines without a product id or with a
    /// quantity below 1 are dropped; quantities above the limit are capped.
    pub fn into_line_item(self, currency: Currency) -> Option<LineItem> {
        let Some(product) = self.product.as_ref().and_then(|p| p.to_product(currency)) else {
            tracing::warn!("dropping cart line without a product id");
            return None;
        };
        let quantity = self.quantity.as_ref().and_then(number).unwrap_or(0.0).floor();
        if quantity < 1.0 {
            tracing::warn!(product = %product.id, quantity, "dropping cart line with quantity below 1");
            return None;
        }
        let max = f64::from(MAX_QUANTITY_PER_ITEM);
        if quantity > max {
            tracing::warn!(product = %product.id, quantity, "capping cart line quantity");
        }
        LineItem::new(product, quantity.min(max) as u32).ok()
    }
}

/// Decode a cart payload into line items, in server order.
pub fn cart_lines(cart: Option<WireCart>, currency: Currency) -> Vec<LineItem> {
    cart.map(WireCart::into_lines)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|line| line.into_line_item(currency))
        .collect()
}

/// A created order as the order service returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub items: Vec<WireOrderItem>,
    #[serde(default)]
    pub shipping_address: Option<WireShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    #[serde(default)]
    pub shipping_cost: Option<Value>,
    #[serde(default)]
    pub tax_amount: Option<Value>,
}

/// Shipping address echoed back on an order. Any field may be null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireShippingAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<WireShippingAddress> for ShippingAddress {
    fn from(wire: WireShippingAddress) -> Self {
        ShippingAddress::new(
            wire.name.unwrap_or_default(),
            wire.street.unwrap_or_default(),
            wire.city.unwrap_or_default(),
            wire.country.unwrap_or_default(),
        )
        .with_zip_code(wire.zip_code.unwrap_or_default())
        .with_phone(wire.phone.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireOrderItem {
    #[serde(default)]
    pub product: Option<WireProductField>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
}

impl WireOrder {
    pub fn into_order(self, currency: Currency) -> Order {
        let amount = |v: &Option<Value>| {
            Money::from_decimal(v.as_ref().and_then(number).unwrap_or(0.0), currency).non_negative()
        };
        let total = amount(&self.total_amount);
        let shipping_cost = amount(&self.shipping_cost);
        let tax = amount(&self.tax_amount);

        let payment_method = self.payment_method.as_deref().and_then(|code| {
            let method = PaymentMethod::from_code(code);
            if method.is_none() {
                tracing::warn!(code, "unknown payment method on order");
            }
            method
        });

        Order {
            id: self
                .mongo_id
                .or(self.id)
                .filter(|id| !id.is_empty())
                .map(OrderId::new),
            order_number: self.order_number.unwrap_or_default(),
            items: self
                .items
                .into_iter()
                .map(|item| item.into_order_item(currency))
                .collect(),
            shipping_address: self.shipping_address.map(ShippingAddress::from),
            payment_method,
            status: self
                .order_status
                .or(self.status)
                .as_deref()
                .map(OrderStatus::parse_lossy)
                .unwrap_or_default(),
            total,
            shipping_cost,
            tax,
        }
    }
}

impl WireOrderItem {
    fn into_order_item(self, currency: Currency) -> OrderItem {
        let product = self.product.as_ref().and_then(|p| p.to_product(currency));
        let price = match self.price.as_ref().and_then(number) {
            Some(price) => Money::from_decimal(price, currency).non_negative(),
            None => product
                .as_ref()
                .map(|p| p.price)
                .unwrap_or_else(|| Money::zero(currency)),
        };
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| product.as_ref().map(|p| p.name.clone()))
            .unwrap_or_default();
        let image = self.image.or_else(|| product.map(|p| p.image));
        let quantity = self
            .quantity
            .as_ref()
            .and_then(number)
            .unwrap_or(0.0)
            .clamp(0.0, f64::from(MAX_QUANTITY_PER_ITEM)) as u32;

        OrderItem {
            name,
            price,
            quantity,
            image,
        }
    }
}

/// Path of a single order. Ids are opaque, so the segment is encoded.
pub fn order_path(id: &OrderId) -> String {
    format!("/orders/{}", urlencoding::encode(id.as_str()))
}

/// Path of a single cart line.
pub fn cart_item_path(product_id: &ProductId) -> String {
    format!("/users/cart/{}", urlencoding::encode(product_id.as_str()))
}

// Numbers arrive as JSON numbers or numeric strings.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::cart::PLACEHOLDER_IMAGE;

    fn decode_cart(json: &str) -> Vec<LineItem> {
        let cart: Option<WireCart> = serde_json::from_str(json).unwrap();
        cart_lines(cart, Currency::USD)
    }

    #[test]
    fn test_populated_product_line() {
        let lines = decode_cart(
            r#"[{"product":{"_id":"A","name":"Widget","price":100,
                 "category":{"name":"Tools"},"brand":"Acme",
                 "featuredImage":"https://cdn/a.png"},"quantity":2}]"#,
        );
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.product.id.as_str(), "A");
        assert_eq!(line.product.price, Money::new(10000, Currency::USD));
        assert_eq!(line.product.category.as_deref(), Some("Tools"));
        assert_eq!(line.product.brand.as_deref(), Some("Acme"));
        assert_eq!(line.product.image, "https://cdn/a.png");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let lines = decode_cart(r#"[{"product":{"id":"B"},"quantity":"3"}]"#);
        let line = &lines[0];
        assert_eq!(line.product.name, "");
        assert!(line.product.price.is_zero());
        assert_eq!(line.product.image, PLACEHOLDER_IMAGE);
        assert_eq!(line.quantity, 3);
    }

    #[test]
    fn test_bare_product_id() {
        let lines = decode_cart(r#"[{"product":"C","quantity":1}]"#);
        assert_eq!(lines[0].product.id.as_str(), "C");
    }

    #[test]
    fn test_bad_lines_dropped() {
        let lines = decode_cart(
            r#"[{"product":"A","quantity":0},
                {"quantity":2},
                {"product":{"name":"no id"},"quantity":1},
                {"product":"D","quantity":1}]"#,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.id.as_str(), "D");
    }

    #[test]
    fn test_negative_price_clamped_and_quantity_capped() {
        let lines = decode_cart(r#"[{"product":{"_id":"E","price":-5},"quantity":20000}]"#);
        assert!(lines[0].product.price.is_zero());
        assert_eq!(lines[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_null_and_wrapped_cart() {
        assert!(decode_cart("null").is_empty());
        let lines = decode_cart(r#"{"items":[{"product":"A","quantity":1}]}"#);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_order_conversion() {
        let wire: WireOrder = serde_json::from_str(
            r#"{"_id":"o1","orderNumber":"ORD-1001",
                "items":[{"product":{"_id":"A","name":"Widget","price":100},"quantity":2},
                         {"name":"Gadget","price":"5.00","quantity":1,"image":"/g.png"}],
                "shippingAddress":{"name":"Jane","street":"1 Main","city":"Boston","country":"USA"},
                "paymentMethod":"paypal","orderStatus":"processing",
                "totalAmount":221.0,"shippingCost":0,"taxAmount":20.5}"#,
        )
        .unwrap();
        let order = wire.into_order(Currency::USD);

        assert_eq!(order.id.as_ref().map(|id| id.as_str()), Some("o1"));
        assert_eq!(order.order_number, "ORD-1001");
        assert_eq!(order.items[0].name, "Widget");
        assert_eq!(order.items[0].price.display(), "$100.00");
        assert_eq!(order.items[1].image.as_deref(), Some("/g.png"));
        assert_eq!(order.payment_method, Some(PaymentMethod::Paypal));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total.display(), "$221.00");
        assert_eq!(order.tax.display(), "$20.50");
        assert_eq!(order.shipping_address.unwrap().city, "Boston");
    }

    #[test]
    fn test_duplicate_id_keys_accepted() {
        let lines = decode_cart(
            r#"[{"product":{"_id":"A","id":"A","name":"W","price":100,
                 "featuredImage":"/a.png","image":"/a-small.png"},"quantity":2},
                {"product":"B","quantity":1}]"#,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product.id.as_str(), "A");
        assert_eq!(lines[0].product.image, "/a.png");
        assert_eq!(lines[0].quantity, 2);

        let wire: WireOrder = serde_json::from_str(
            r#"{"_id":"o1","id":"o1","orderStatus":"shipped","status":"shipped"}"#,
        )
        .unwrap();
        let order = wire.into_order(Currency::USD);
        assert_eq!(order.id.as_ref().map(|id| id.as_str()), Some("o1"));
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_plain_id_and_image_keys() {
        let lines = decode_cart(r#"[{"product":{"id":"C","image":"/c.png"},"quantity":1}]"#);
        assert_eq!(lines[0].product.id.as_str(), "C");
        assert_eq!(lines[0].product.image, "/c.png");

        let wire: WireOrder = serde_json::from_str(r#"{"id":"o2","status":"delivered"}"#).unwrap();
        let order = wire.into_order(Currency::USD);
        assert_eq!(order.id.as_ref().map(|id| id.as_str()), Some("o2"));
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_order_with_null_address_fields() {
        let wire: WireOrder = serde_json::from_str(
            r#"{"orderNumber":"ORD-7",
                "shippingAddress":{"name":"Jane","street":"1 Main","city":"Boston",
                                   "country":null,"zipCode":null,"phone":null}}"#,
        )
        .unwrap();
        let order = wire.into_order(Currency::USD);
        let address = order.shipping_address.unwrap();
        assert_eq!(order.order_number, "ORD-7");
        assert_eq!(address.city, "Boston");
        assert_eq!(address.country, "");
        assert_eq!(address.zip_code, "");
        assert_eq!(address.phone, "");
    }

    #[test]
    fn test_paths_encode_ids() {
        assert_eq!(cart_item_path(&ProductId::new("A")), "/users/cart/A");
        assert_eq!(
            cart_item_path(&ProductId::new("a/b?c#d")),
            "/users/cart/a%2Fb%3Fc%23d"
        );
        assert_eq!(order_path(&OrderId::new("o 1")), "/orders/o%201");
    }

    #[test]
    fn test_empty_order_object() {
        let order = WireOrder::default().into_order(Currency::USD);
        assert!(order.items.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.total.is_zero());
    }

    #[test]
    fn test_request_bodies() {
        let body = AddToCartBody {
            product_id: "A",
            quantity: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"productId": "A", "quantity": 2})
        );
        assert_eq!(
            serde_json::to_value(UpdateQuantityBody { quantity: 3 }).unwrap(),
            serde_json::json!({"quantity": 3})
        );
    }
}
