//! Storage trait

use async_trait::async_trait;
use crate::auth::{types::User, errors::AuthError};

/// User credential store keyed by email
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`AuthError::EmailExists`] when the email is taken. The
    /// check and the insert are one atomic step.
    async fn save_user(&self, user: User) -> Result<User, AuthError>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// All users
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
}
