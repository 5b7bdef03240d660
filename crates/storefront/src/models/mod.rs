//! Domain models for the storefront.
//!
//! Stored entities (`Category`, `Medicine`, `Review`, `CartItem`, `User`)
//! plus the joined shapes the JSON API returns. All JSON uses camelCase keys.

pub mod cart;
pub mod category;
pub mod medicine;
pub mod review;
pub mod user;

pub use cart::{CartItem, CartItemWithMedicine, CartSummary, CartUpdate};
pub use category::{Category, NewCategory};
pub use medicine::{Medicine, MedicineFilter, MedicineWithCategory, NewMedicine};
pub use review::{NewReview, RatingDistribution, Review, ReviewSummary};
pub use user::{NewUser, User};
