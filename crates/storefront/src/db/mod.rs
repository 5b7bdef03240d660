//! In-memory data store for the storefront.
//!
//! # Tables
//!
//! - `categories` - Catalog categories (seeded once, immutable afterwards)
//! - `medicines` - Catalog items with cached rating aggregates
//! - `reviews` - Customer reviews, append-only
//! - `cart_items` - Per-session cart lines
//! - `users` - Registered users (not exposed over HTTP)
//!
//! Nothing is persisted: every table lives for the process lifetime. Rows are
//! kept in insertion order, so listings are stable.
//!
//! # Locking
//!
//! All tables sit behind one `RwLock`. Repositories take the write lock once
//! per mutation, so a check and the write that depends on it (merge-on-add,
//! review recompute) can never interleave with another request.

pub mod cart;
pub mod catalog;
pub mod reviews;
pub mod seed;
pub mod users;

use tokio::sync::RwLock;

use healwell_core::{CategoryId, MedicineId};

use crate::models::{CartItem, Category, Medicine, Review, User};

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use reviews::ReviewRepository;
pub use seed::{CatalogSeed, SeedError};
pub use users::UserRepository;

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A write referenced an entity that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Stored data breaks an invariant (e.g., medicine without category).
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Rows of every table.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) categories: Vec<Category>,
    pub(crate) medicines: Vec<Medicine>,
    pub(crate) reviews: Vec<Review>,
    pub(crate) cart_items: Vec<CartItem>,
    pub(crate) users: Vec<User>,
}

impl Tables {
    pub(crate) fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub(crate) fn medicine(&self, id: &MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| &m.id == id)
    }

    pub(crate) fn medicine_mut(&mut self, id: &MedicineId) -> Option<&mut Medicine> {
        self.medicines.iter_mut().find(|m| &m.id == id)
    }

    pub(crate) fn reviews_for<'a>(
        &'a self,
        medicine_id: &'a MedicineId,
    ) -> impl Iterator<Item = &'a Review> + 'a {
        self.reviews
            .iter()
            .filter(move |r| &r.medicine_id == medicine_id)
    }
}

/// The process-wide store.
///
/// Created once at startup and shared through `AppState`. Use the
/// repositories (`CatalogRepository`, `CartRepository`, ...) to read and
/// write it.
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from a validated catalog seed.
    ///
    /// Seeded rows are inserted verbatim, including their cached rating
    /// aggregates.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Invalid` if the seed fails validation.
    pub fn from_seed(seed: CatalogSeed) -> Result<Self, SeedError> {
        let problems = seed::validate_seed(&seed);
        if !problems.is_empty() {
            return Err(SeedError::Invalid(problems));
        }

        let tables = Tables {
            categories: seed.categories,
            medicines: seed.medicines,
            reviews: seed.reviews,
            ..Tables::default()
        };

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// Create a store populated with the built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded seed cannot be parsed or is invalid.
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_seed(CatalogSeed::builtin()?)
    }

    /// Number of medicines currently stored (active or not).
    pub async fn medicine_count(&self) -> usize {
        self.tables.read().await.medicines.len()
    }

    pub(crate) const fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }
}
