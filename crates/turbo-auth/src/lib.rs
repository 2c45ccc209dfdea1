//! Authentication state for TurboCommerce clients.
//!
//! The signed-in session is held in an explicit [`SessionContext`] that is
//! handed to whatever makes authenticated calls. Nothing is read from
//! process-global state.

mod context;
mod error;
mod session;
mod user;

pub use context::SessionContext;
pub use error::AuthError;
pub use session::AuthSession;
pub use user::UserProfile;
