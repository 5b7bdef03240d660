//! HealWell Mart Core - Shared domain types.
//!
//! This crate provides the value types used by every HealWell Mart component:
//! - `storefront` - Catalog, cart and review JSON API
//! - `cli` - Catalog seed tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage,
//! no HTTP. Anything that needs a lock or a socket lives in the storefront.
//!
//! # Modules
//!
//! - [`types`] - Newtype identifiers, prices, ratings, emails and stock status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
