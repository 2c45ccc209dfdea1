//! Order submit state machine.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──succeed──▶ Succeeded(order)
//!  ▲                  │
//!  │                  └──fail──▶ Failed(message)
//!  └──────── Failed accepts a new `begin`, same as Idle
//! ```

use crate::checkout::Order;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Where an order submission stands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Waiting on the order service.
    Submitting,
    /// The order was created.
    Succeeded(Order),
    /// The last attempt failed; the message is shown and the user may retry.
    Failed(String),
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded(_) => "succeeded",
            CheckoutState::Failed(_) => "failed",
        }
    }

    /// Whether a submit may start from here.
    pub fn can_submit(&self) -> bool {
        matches!(self, CheckoutState::Idle | CheckoutState::Failed(_))
    }

    /// Whether a submission is in flight (the submit button shows busy).
    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }

    /// The error to show, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CheckoutState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The created order, once submission succeeded.
    pub fn order(&self) -> Option<&Order> {
        match self {
            CheckoutState::Succeeded(order) => Some(order),
            _ => None,
        }
    }

    /// Move to `Submitting`.
    pub fn begin(&mut self) -> Result<(), CommerceError> {
        match self {
            CheckoutState::Idle | CheckoutState::Failed(_) => {
                *self = CheckoutState::Submitting;
                Ok(())
            }
            CheckoutState::Submitting => Err(CommerceError::SubmissionInProgress),
            CheckoutState::Succeeded(_) => Err(self.invalid_transition("submitting")),
        }
    }

    /// Record the created order.
    pub fn succeed(&mut self, order: Order) -> Result<(), CommerceError> {
        if !self.is_submitting() {
            return Err(self.invalid_transition("succeeded"));
        }
        *self = CheckoutState::Succeeded(order);
        Ok(())
    }

    /// Record a failure. Allowed from `Idle` too, for local validation
    /// failures that never reached `Submitting`.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CommerceError> {
        if matches!(self, CheckoutState::Succeeded(_)) {
            return Err(self.invalid_transition("failed"));
        }
        *self = CheckoutState::Failed(message.into());
        Ok(())
    }

    /// Back to `Idle`, e.g. when the form is reopened.
    pub fn reset(&mut self) {
        *self = CheckoutState::Idle;
    }

    fn invalid_transition(&self, to: &str) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.as_str().to_string(),
            to: to.to_string(),
        }
    }
}
