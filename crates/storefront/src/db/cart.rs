//! Cart repository.
//!
//! Carts are keyed by `SessionId`. Lines whose medicine has disappeared are
//! skipped on read rather than failing the whole cart.

use std::num::NonZeroU32;

use chrono::Utc;
use tracing::{instrument, warn};

use healwell_core::{CartItemId, MedicineId, SessionId};

use super::{Database, Tables};
use crate::models::{CartItem, CartItemWithMedicine, CartSummary, CartUpdate};

/// Repository for session cart operations.
pub struct CartRepository<'a> {
    db: &'a Database,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List a session's cart lines joined with their medicines, oldest first.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn list_items(&self, session: &SessionId) -> Vec<CartItemWithMedicine> {
        let tables = self.db.tables().read().await;
        joined_items(&tables, session)
    }

    /// Add `quantity` of a medicine to the cart.
    ///
    /// If the session already has a line for the medicine its quantity is
    /// increased; otherwise a new line is created. The medicine is not
    /// required to exist.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn add_item(
        &self,
        session: &SessionId,
        medicine_id: &MedicineId,
        quantity: NonZeroU32,
    ) -> CartItem {
        let mut tables = self.db.tables().write().await;

        if tables.medicine(medicine_id).is_none() {
            warn!(%medicine_id, "Adding unknown medicine to cart");
        }

        if let Some(line) = tables
            .cart_items
            .iter_mut()
            .find(|i| &i.session_id == session && &i.medicine_id == medicine_id)
        {
            line.quantity = line.quantity.saturating_add(quantity.get());
            return line.clone();
        }

        let line = CartItem {
            id: CartItemId::generate(),
            session_id: session.clone(),
            medicine_id: medicine_id.clone(),
            quantity: quantity.get(),
            created_at: Utc::now(),
        };
        tables.cart_items.push(line.clone());
        line
    }

    /// Set the quantity of a cart line. Zero removes the line.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn update_quantity(
        &self,
        session: &SessionId,
        medicine_id: &MedicineId,
        quantity: u32,
    ) -> CartUpdate {
        let mut tables = self.db.tables().write().await;

        let Some(pos) = position(&tables, session, medicine_id) else {
            return CartUpdate::NotFound;
        };

        if quantity == 0 {
            tables.cart_items.remove(pos);
            return CartUpdate::Removed;
        }

        match tables.cart_items.get_mut(pos) {
            Some(line) => {
                line.quantity = quantity;
                CartUpdate::Updated(line.clone())
            }
            None => CartUpdate::NotFound,
        }
    }

    /// Remove a cart line. Returns `true` if a line was removed.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn remove_item(&self, session: &SessionId, medicine_id: &MedicineId) -> bool {
        let mut tables = self.db.tables().write().await;
        match position(&tables, session, medicine_id) {
            Some(pos) => {
                tables.cart_items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Empty a session's cart. Returns the number of lines removed.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn clear(&self, session: &SessionId) -> usize {
        let mut tables = self.db.tables().write().await;
        let before = tables.cart_items.len();
        tables.cart_items.retain(|i| &i.session_id != session);
        before - tables.cart_items.len()
    }

    /// Item count, line count and subtotal for a session's cart.
    pub async fn summary(&self, session: &SessionId) -> CartSummary {
        let tables = self.db.tables().read().await;
        CartSummary::from_items(&joined_items(&tables, session))
    }
}

fn position(tables: &Tables, session: &SessionId, medicine_id: &MedicineId) -> Option<usize> {
    tables
        .cart_items
        .iter()
        .position(|i| &i.session_id == session && &i.medicine_id == medicine_id)
}

fn joined_items(tables: &Tables, session: &SessionId) -> Vec<CartItemWithMedicine> {
    tables
        .cart_items
        .iter()
        .filter(|i| &i.session_id == session)
        .filter_map(|item| {
            let Some(medicine) = tables.medicine(&item.medicine_id) else {
                warn!(
                    cart_item_id = %item.id,
                    medicine_id = %item.medicine_id,
                    "Skipping cart line for missing medicine"
                );
                return None;
            };
            Some(CartItemWithMedicine {
                item: item.clone(),
                medicine: medicine.clone(),
            })
        })
        .collect()
}
