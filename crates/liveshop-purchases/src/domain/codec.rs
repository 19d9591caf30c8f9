//! Event log entry encoding.
//!
//! Each entry is a self-contained JSON document holding the whole purchase,
//! snapshots included.

use liveshop_core::error::DomainError;
use liveshop_core::model::PurchaseEvent;

/// Shared event log key that every purchase is appended under.
pub const RECENT_PURCHASES_KEY: &str = "recent_purchases";

/// Serializes a purchase into its event log form.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a price is not finite or the event
/// duration is negative or overflows `i64` nanoseconds. JSON has no encoding
/// for `NaN` or infinity, and `serde_json` would silently write `null`.
pub fn encode_entry(purchase: &PurchaseEvent) -> Result<String, DomainError> {
    if !purchase.price.is_finite() || !purchase.product.price.is_finite() {
        return Err(DomainError::Validation(format!(
            "purchase {} has a non-finite price",
            purchase.id
        )));
    }
    serde_json::to_string(purchase).map_err(|e| {
        DomainError::Validation(format!("purchase {} cannot be encoded: {e}", purchase.id))
    })
}

/// Parses one event log entry. `position` names the entry in error messages.
///
/// # Errors
///
/// Returns `DomainError::Decode` if the entry is not a valid purchase.
pub fn decode_entry(position: &str, raw: &str) -> Result<PurchaseEvent, DomainError> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Decode(format!("{position} is not a valid purchase: {e}")))
}
