//! Customer extraction from order payloads.
//!
//! Each customer field is resolved through an ordered list of sources on
//! the order. The first source holding a non-empty value wins, and that
//! value is forwarded exactly as received.

use thiserror::Error;
use tracing::{info, warn};

use crate::order::types::{CustomerRecord, OrderRecord};

/// Reads one candidate value from an order.
type Accessor = fn(&OrderRecord) -> Option<&str>;

/// A named source in a fallback chain.
type Source = (&'static str, Accessor);

const FIRST_NAME_SOURCES: &[Source] = &[
    ("billing_address", billing_first_name),
    ("shipping_address", shipping_first_name),
    ("customer", customer_first_name),
];

const LAST_NAME_SOURCES: &[Source] = &[
    ("billing_address", billing_last_name),
    ("shipping_address", shipping_last_name),
    ("customer", customer_last_name),
];

const EMAIL_SOURCES: &[Source] = &[("order", order_email), ("customer", customer_email)];

const PHONE_SOURCES: &[Source] = &[
    ("billing_address", billing_phone),
    ("shipping_address", shipping_phone),
    ("customer", customer_phone),
];

/// Required fields in reporting order.
const REQUIRED_FIELDS: &[(&str, &[Source])] = &[
    ("first_name", FIRST_NAME_SOURCES),
    ("last_name", LAST_NAME_SOURCES),
    ("email", EMAIL_SOURCES),
];

/// Extraction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required customer field: {field}")]
    MissingRequiredField { field: &'static str },
}

/// Build the canonical customer record for an order.
///
/// Fails on the first required field (first_name, last_name, email) that
/// no source provides. Phone is optional and left as `None` when absent.
pub fn extract_customer(order: &OrderRecord) -> Result<CustomerRecord, ValidationError> {
    let first_name = require(order, "first_name", FIRST_NAME_SOURCES)?;
    let last_name = require(order, "last_name", LAST_NAME_SOURCES)?;
    let email = require(order, "email", EMAIL_SOURCES)?;
    let phone = resolve(order, PHONE_SOURCES);

    info!(
        order_id = %order.id_label(),
        order_number = %order.order_number_label(),
        first_name_source = first_name.0,
        last_name_source = last_name.0,
        email_source = email.0,
        phone_source = phone.map(|(source, _)| source).unwrap_or("none"),
        "customer_extracted"
    );

    Ok(CustomerRecord {
        first_name: first_name.1.to_string(),
        last_name: last_name.1.to_string(),
        email: email.1.to_string(),
        phone: phone.map(|(_, value)| value.to_string()),
    })
}

/// List every required field that no source provides.
pub fn missing_required_fields(order: &OrderRecord) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .filter(|(_, sources)| resolve(order, sources).is_none())
        .map(|(field, _)| *field)
        .collect()
}

/// Walk a fallback chain, returning the winning source name and its value.
fn resolve<'a>(order: &'a OrderRecord, sources: &[Source]) -> Option<(&'static str, &'a str)> {
    sources.iter().find_map(|(name, accessor)| {
        accessor(order)
            .filter(|v| !v.is_empty())
            .map(|v| (*name, v))
    })
}

fn require<'a>(
    order: &'a OrderRecord,
    field: &'static str,
    sources: &[Source],
) -> Result<(&'static str, &'a str), ValidationError> {
    resolve(order, sources).ok_or_else(|| {
        warn!(
            order_id = %order.id_label(),
            order_number = %order.order_number_label(),
            field = field,
            "customer_field_missing"
        );
        ValidationError::MissingRequiredField { field }
    })
}

// Accessors

fn billing_first_name(o: &OrderRecord) -> Option<&str> {
    o.billing_address.as_ref()?.first_name.as_deref()
}

fn shipping_first_name(o: &OrderRecord) -> Option<&str> {
    o.shipping_address.as_ref()?.first_name.as_deref()
}

fn customer_first_name(o: &OrderRecord) -> Option<&str> {
    o.customer.as_ref()?.first_name.as_deref()
}

fn billing_last_name(o: &OrderRecord) -> Option<&str> {
    o.billing_address.as_ref()?.last_name.as_deref()
}

fn shipping_last_name(o: &OrderRecord) -> Option<&str> {
    o.shipping_address.as_ref()?.last_name.as_deref()
}

fn customer_last_name(o: &OrderRecord) -> Option<&str> {
    o.customer.as_ref()?.last_name.as_deref()
}

fn order_email(o: &OrderRecord) -> Option<&str> {
    o.email.as_deref()
}

fn customer_email(o: &OrderRecord) -> Option<&str> {
    o.customer.as_ref()?.email.as_deref()
}

fn billing_phone(o: &OrderRecord) -> Option<&str> {
    o.billing_address.as_ref()?.phone.as_deref()
}

fn shipping_phone(o: &OrderRecord) -> Option<&str> {
    o.shipping_address.as_ref()?.phone.as_deref()
}

fn customer_phone(o: &OrderRecord) -> Option<&str> {
    o.customer.as_ref()?.phone.as_deref()
}
