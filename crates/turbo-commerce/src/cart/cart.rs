//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Image shown when the catalog has none for a product.
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/100/100";

/// A reference to catalog product data.
///
/// The catalog owns products; the cart only keeps the fields it needs to
/// price and display a line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Never negative.
    pub price: Money,
    /// Category label.
    pub category: Option<String>,
    /// Brand label.
    pub brand: Option<String>,
    /// Image URL.
    pub image: String,
}

impl ProductRef {
    /// Create a product reference with no labels and the placeholder image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.non_negative(),
            category: None,
            brand: None,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the brand label.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the image URL. Blank URLs keep the placeholder.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        if !image.trim().is_empty() {
            self.image = image;
        }
        self
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The product on this line.
    pub product: ProductRef,
    /// Quantity, always in `1..=MAX_QUANTITY_PER_ITEM`.
    pub quantity: u32,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: ProductRef, quantity: u32) -> Result<Self, CommerceError> {
        validate_quantity(i64::from(quantity))?;
        Ok(Self { product, quantity })
    }

    /// Product id of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// Check a requested quantity against the line item bounds (1..=9999).
pub fn validate_quantity(quantity: i64) -> Result<u32, CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > i64::from(MAX_QUANTITY_PER_ITEM) {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            i64::from(MAX_QUANTITY_PER_ITEM),
        ));
    }
    Ok(quantity as u32)
}

/// A shopping cart: line items keyed by product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Items in the cart, in display order.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Build a cart from line items, keeping first-seen order.
    ///
    /// Lines repeating a product id are merged into the first one by summing
    /// quantities, capped at `MAX_QUANTITY_PER_ITEM`.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        for item in items {
            match cart
                .items
                .iter_mut()
                .find(|i| i.product.id == item.product.id)
            {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for a product.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Current quantity of a product, if it is in the cart.
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.get_item(product_id).map(|i| i.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> ProductRef {
        ProductRef::new(id, format!("Product {}", id), Money::new(cents, Currency::USD))
    }

    #[test]
    fn test_line_item_quantity_bounds() {
        assert!(LineItem::new(product("A", 100), 1).is_ok());
        assert_eq!(
            LineItem::new(product("A", 100), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(LineItem::new(product("A", 100), MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_product_ref_defaults() {
        let p = ProductRef::new("A", "Widget", Money::new(-500, Currency::USD)).with_image("  ");
        assert_eq!(p.price.amount_cents, 0);
        assert_eq!(p.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let cart = Cart::from_items(
            vec![
                LineItem::new(product("A", 100), 2).unwrap(),
                LineItem::new(product("B", 200), 1).unwrap(),
                LineItem::new(product("A", 100), 3).unwrap(),
            ],
            Currency::USD,
        );

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.quantity_of(&ProductId::new("A")), Some(5));
        assert_eq!(cart.items[0].product.id.as_str(), "A");
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(product("A", 1250), 3).unwrap();
        assert_eq!(item.line_total().unwrap().amount_cents, 3750);
    }
}
