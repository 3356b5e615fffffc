//! SQLite storage
//!
//! Email uniqueness is enforced by the `UNIQUE` constraint on `users.email`;
//! a violated constraint surfaces as [`AuthError::EmailExists`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use std::str::FromStr;
use tracing::{debug, info};

use super::r#trait::UserStorage;
use crate::auth::{
    errors::AuthError,
    types::{Role, User},
};
use crate::utils::anonymize_email;

type UserRow = (String, String, String, String, String);

/// SQLite-backed user storage
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Connect and create the schema if missing.
    ///
    /// `sqlite::memory:` gives every connection its own database, so use
    /// `max_connections = 1` with it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AuthError> {
        info!("initializing user database");

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(connect_options)
            .await?;

        sqlx::query(include_str!("../../../migrations/users/001_create_users_table.sql"))
            .execute(&pool)
            .await?;

        info!("user database ready");
        Ok(Self { pool })
    }

    /// Connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_user(row: UserRow) -> Result<User, AuthError> {
        let (id, email, password_hash, role, created_at) = row;

        let role = Role::parse(&role)
            .ok_or_else(|| AuthError::StorageError(format!("unknown role in database: {}", role)))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AuthError::StorageError(format!("bad created_at: {}", e)))?;

        Ok(User {
            id,
            email,
            password_hash,
            role,
            created_at,
        })
    }
}

#[async_trait]
impl UserStorage for SqliteStorage {
    async fn save_user(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!("user saved: email={}", anonymize_email(&user.email));
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, role, created_at FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_user).collect()
    }
}
