//! Observability for TurboCommerce clients.
//!
//! This crate provides:
//! - `LogConfig` / `init_logging` - `tracing` subscriber setup (human or JSON)
//! - `RequestId` - Correlation id sent with every outbound call

mod logging;
mod request_id;

pub use logging::*;
pub use request_id::{RequestId, REQUEST_ID_HEADER};
