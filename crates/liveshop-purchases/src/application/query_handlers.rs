//! Query handlers for the Purchases context.
//!
//! The two event log readers and the dashboard aggregator. None of them
//! write, and none of them retry.

use liveshop_core::error::DomainError;
use liveshop_core::event_log::EventLog;
use liveshop_core::model::{PurchaseEvent, PurchaseRecord};
use liveshop_core::store::DomainStore;
use serde::Serialize;

use crate::domain::codec::{RECENT_PURCHASES_KEY, decode_entry};

/// Human-readable notice about the most recent purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// `"New purchase: {quantity} x {product name}"`.
    pub message: String,
}

impl Notification {
    /// Builds the notice for `purchase`.
    #[must_use]
    pub fn for_purchase(purchase: &PurchaseEvent) -> Self {
        Self {
            message: format!(
                "New purchase: {} x {}",
                purchase.quantity, purchase.product.name
            ),
        }
    }
}

/// Lifetime sales totals across every purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardTotals {
    /// Sum of quantity times unit price.
    pub total_earned: f64,
    /// Sum of quantities.
    pub items_sold: i64,
}

impl DashboardTotals {
    /// Folds purchase rows into totals. No rows gives zero for both.
    #[must_use]
    pub fn from_records(records: &[PurchaseRecord]) -> Self {
        records.iter().fold(
            Self {
                total_earned: 0.0,
                items_sold: 0,
            },
            |totals, record| Self {
                total_earned: totals.total_earned + f64::from(record.quantity) * record.price,
                items_sold: totals.items_sold + i64::from(record.quantity),
            },
        )
    }
}

/// Returns every purchase in the event log, oldest first.
///
/// A single undecodable entry fails the whole read rather than being
/// skipped, so corruption surfaces immediately.
///
/// # Errors
///
/// Returns `DomainError::Transport` if the log cannot be read.
/// Returns `DomainError::Decode` naming the first entry that fails to parse.
pub async fn recent_purchases(log: &dyn EventLog) -> Result<Vec<PurchaseEvent>, DomainError> {
    let entries = log.read_all(RECENT_PURCHASES_KEY).await?;
    entries
        .iter()
        .enumerate()
        .map(|(index, raw)| decode_entry(&format!("entry {index}"), raw))
        .collect()
}

/// Returns a notification for the most recently appended purchase.
///
/// This is a point-in-time read of the log tail; it does not wait for the
/// next purchase.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the log is empty.
/// Returns `DomainError::Transport` if the log cannot be read.
/// Returns `DomainError::Decode` if the tail entry fails to parse.
pub async fn latest_notification(log: &dyn EventLog) -> Result<Notification, DomainError> {
    let raw = log
        .read_last(RECENT_PURCHASES_KEY)
        .await?
        .ok_or_else(|| DomainError::NotFound("no recent purchases".to_owned()))?;
    let purchase = decode_entry("latest entry", &raw)?;
    Ok(Notification::for_purchase(&purchase))
}

/// Recomputes lifetime totals from every purchase in the domain store.
///
/// # Errors
///
/// Returns `DomainError::Transport` if the store cannot be read.
pub async fn dashboard_totals(store: &dyn DomainStore) -> Result<DashboardTotals, DomainError> {
    let records = store.list_purchases().await?;
    Ok(DashboardTotals::from_records(&records))
}
