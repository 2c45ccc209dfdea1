//! Payment method selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Wire code, e.g. "credit_card".
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Parse a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "credit_card" => Some(PaymentMethod::CreditCard),
            "paypal" => Some(PaymentMethod::Paypal),
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card fields collected by the form. Never validated and never sent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &redact(&self.card_number))
            .field("expiry_date", &"<redacted>")
            .field("cvv", &"<redacted>")
            .field("name_on_card", &self.name_on_card)
            .finish()
    }
}

fn redact(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****{}", tail)
}

/// The payment choice made at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSelection {
    pub method: PaymentMethod,
    pub card: CardDetails,
}

impl PaymentSelection {
    /// Select a method with no card details.
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            card: CardDetails::default(),
        }
    }

    /// Attach card details.
    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = card;
        self
    }
}
