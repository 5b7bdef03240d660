//! User repository.
//!
//! Usernames and emails are unique. Emails are compared in their normalized
//! (lowercase) form.

use chrono::Utc;
use tracing::instrument;

use healwell_core::{Email, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewUser, User};

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    #[instrument(skip(self, new), fields(username = %new.username))]
    pub async fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.db.tables().write().await;

        if tables.users.iter().any(|u| u.username == new.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' already exists",
                new.username
            )));
        }
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(RepositoryError::Conflict(format!(
                "email '{}' already exists",
                new.email
            )));
        }

        let user = User {
            id: UserId::generate(),
            username: new.username,
            email: new.email,
            password: new.password,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    /// Get a user by their ID.
    pub async fn get_by_id(&self, id: &UserId) -> Option<User> {
        self.db
            .tables()
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
    }

    /// Get a user by their username (exact match).
    pub async fn get_by_username(&self, username: &str) -> Option<User> {
        self.db
            .tables()
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Get a user by their email address.
    pub async fn get_by_email(&self, email: &Email) -> Option<User> {
        self.db
            .tables()
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.email == email)
            .cloned()
    }
}
