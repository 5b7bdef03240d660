//! Core types for HealWell Mart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod rating;
pub mod session;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError, discount_percent, line_total};
pub use rating::{AverageRating, Rating, RatingError};
pub use session::SessionId;
pub use status::*;
