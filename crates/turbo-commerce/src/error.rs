//! Commerce error types.

use thiserror::Error;

/// Message shown when required shipping fields are missing.
pub const MISSING_SHIPPING_FIELDS: &str = "Please fill in all required shipping fields";

/// Message shown when an order is attempted with an empty cart.
pub const EMPTY_CART: &str = "Your cart is empty";

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Order attempted with no line items.
    #[error("{}", EMPTY_CART)]
    EmptyCart,

    /// Required shipping fields are blank.
    #[error("{}", MISSING_SHIPPING_FIELDS)]
    MissingShippingFields(Vec<&'static str>),

    /// A submission is already in flight.
    #[error("An order is already being submitted")]
    SubmissionInProgress,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Whether this error was detected locally before any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::InvalidQuantity(_)
                | CommerceError::QuantityExceedsLimit(..)
                | CommerceError::EmptyCart
                | CommerceError::MissingShippingFields(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(CommerceError::EmptyCart.to_string(), "Your cart is empty");
        assert_eq!(
            CommerceError::MissingShippingFields(vec!["name"]).to_string(),
            "Please fill in all required shipping fields"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(CommerceError::InvalidQuantity(0).is_validation());
        assert!(CommerceError::EmptyCart.is_validation());
        assert!(!CommerceError::Overflow.is_validation());
        assert!(!CommerceError::SubmissionInProgress.is_validation());
    }
}
