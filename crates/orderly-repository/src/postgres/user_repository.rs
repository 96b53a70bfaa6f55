//! Postgres user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderly_core::{OrderlyResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Postgres user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new Postgres user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> OrderlyResult<User> {
        debug!("Inserting user with email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: UserId) -> OrderlyResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.get())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> OrderlyResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }
}
