//! Orderhook - order webhook relay.
//!
//! Receives order-created webhooks, verifies their HMAC signature, extracts
//! the customer's contact details and forwards them to the invitation API.
//!
//! ## Architecture
//!
//! ```text
//! Storefront → web (verify) → order (parse, extract) → invite (forward) → Invitation API
//! ```

pub mod config;
pub mod invite;
pub mod order;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use invite::{ForwardError, Forwarder};
pub use order::{extract_customer, CustomerRecord, OrderRecord, ValidationError};
pub use web::{router, verify_webhook_signature, AppState, WebhookError};
