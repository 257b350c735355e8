//! Downstream invitation API client.

pub mod forwarder;

pub use forwarder::{ForwardError, Forwarder};
