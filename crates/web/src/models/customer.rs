//! Customer profile domain type.

use chrono::{DateTime, Utc};

use orderdesk_core::{CustomerId, UserId};

/// A customer profile, paired one-to-one with a user account.
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Owning user account.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional profile image URL.
    pub avatar_url: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}
