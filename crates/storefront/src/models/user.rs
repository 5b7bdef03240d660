//! User domain types.
//!
//! Users exist in the data model but no HTTP route exposes them yet; there is
//! no login flow.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use healwell_core::{Email, UserId};

/// A registered user.
///
/// The password is opaque and never leaves the process; `Debug` output
/// redacts it.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: Email,
    /// Opaque credential as supplied at registration.
    pub password: SecretString,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password: SecretString,
}
