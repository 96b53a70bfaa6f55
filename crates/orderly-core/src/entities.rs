//! Domain entities.

use crate::{OrderId, UserId};
use chrono::{DateTime, Utc};

/// A registered user as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique email address.
    pub email: String,
    /// Password hash (never exposed via API or cache).
    pub password_hash: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An order placed on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// Owner as resolved by the directory at creation time.
    pub user_id: UserId,
    pub product: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields of an order before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product: String,
    pub quantity: i64,
}

/// A user as resolved through the directory.
///
/// This is the remote view of a user: it never carries credentials, and its
/// id is the canonical one an order must be persisted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: UserId,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}
