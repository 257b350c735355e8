//! Order payload and customer record types.
//!
//! `OrderRecord` is the subset of the storefront order payload this service
//! reads; every other field is ignored. `CustomerRecord` is the canonical
//! body sent to the invitation API.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound Order Types
// =============================================================================

/// Order identifier as sent by the storefront.
///
/// Some platforms send numeric ids, others send strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRef {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderRef::Number(n) => write!(f, "{}", n),
            OrderRef::Text(s) => f.write_str(s),
        }
    }
}

/// A billing or shipping address on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// The customer account attached to an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Parsed order-created webhook payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Storefront order id
    #[serde(default)]
    pub id: Option<OrderRef>,
    /// Human-facing order number
    #[serde(default)]
    pub order_number: Option<OrderRef>,
    /// Contact email captured at checkout
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
}

impl OrderRecord {
    /// Order id for log fields, or "unknown".
    pub fn id_label(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Order number for log fields, or "unknown".
    pub fn order_number_label(&self) -> String {
        self.order_number
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Built-in order used by the `/test-webhook` endpoint.
    pub fn sample() -> Self {
        OrderRecord {
            id: Some(OrderRef::Text("test-order".to_string())),
            order_number: Some(OrderRef::Text("TEST-1001".to_string())),
            email: Some("test.customer@example.com".to_string()),
            billing_address: Some(Address {
                first_name: Some("Test".to_string()),
                last_name: Some("Customer".to_string()),
                email: None,
                phone: Some("+15555550100".to_string()),
            }),
            shipping_address: None,
            customer: None,
        }
    }
}

// =============================================================================
// Outbound Customer Type
// =============================================================================

/// Customer contact forwarded to the invitation API.
///
/// Built only by `extract_customer`, which guarantees the required fields
/// are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
