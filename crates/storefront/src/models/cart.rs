//! Session-scoped cart lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use healwell_core::{CartItemId, MedicineId, Price, SessionId, line_total};

use super::Medicine;

/// One line in a session's cart.
///
/// At most one line exists per (session, medicine); re-adding merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub session_id: SessionId,
    pub medicine_id: MedicineId,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with the medicine it refers to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemWithMedicine {
    #[serde(flatten)]
    pub item: CartItem,
    pub medicine: Medicine,
}

impl CartItemWithMedicine {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.medicine.price, self.item.quantity)
    }
}

/// Result of setting a cart line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// The line now has the requested quantity.
    Updated(CartItem),
    /// A zero quantity deleted the line.
    Removed,
    /// The session has no line for that medicine.
    NotFound,
}

/// Totals for a session's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of quantities across all lines.
    pub item_count: u32,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of line totals, two decimal places.
    pub subtotal: Decimal,
}

impl CartSummary {
    /// Total up joined cart lines.
    #[must_use]
    pub fn from_items(items: &[CartItemWithMedicine]) -> Self {
        let (item_count, subtotal) = items.iter().fold(
            (0u32, Price::ZERO.amount()),
            |(count, subtotal), line| {
                (
                    count.saturating_add(line.item.quantity),
                    subtotal + line.line_total(),
                )
            },
        );

        Self {
            item_count,
            line_count: items.len(),
            subtotal,
        }
    }
}
