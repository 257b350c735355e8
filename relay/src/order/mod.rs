//! Order payload handling.
//!
//! ```text
//! raw body → OrderRecord → extract_customer() → CustomerRecord
//! ```

pub mod extractor;
pub mod types;

pub use extractor::{extract_customer, missing_required_fields, ValidationError};
pub use types::{Address, CustomerRecord, OrderCustomer, OrderRecord, OrderRef};
