//! Checkout module.
//!
//! Contains the checkout form types, the order submission payload, created
//! orders and the submit state machine.

mod address;
mod flow;
mod order;
mod payment;

pub use address::{ShippingAddress, DEFAULT_COUNTRY};
pub use flow::CheckoutState;
pub use order::{
    Order, OrderItem, OrderStatus, OrderSubmission, SubmissionItem, DEFAULT_ORDER_NOTES,
    DEFAULT_SHIPPING_METHOD,
};
pub use payment::{CardDetails, PaymentMethod, PaymentSelection};
