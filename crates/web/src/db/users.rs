//! User account repository.
//!
//! Password hashes stay inside this module and the auth service; they are
//! never part of the [`User`] domain type.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;

use orderdesk_core::{CustomerId, Email, Role, UserId};

use super::RepositoryError;
use crate::models::{Customer, User};

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = Role::from_str(&row.role)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row type for login lookups: account plus credentials and profile link.
#[derive(Debug, sqlx::FromRow)]
struct AuthRow {
    id: i32,
    email: String,
    password_hash: String,
    role: String,
    customer_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Repository for user account database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user with their password hash and paired customer ID, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_auth_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String, Option<CustomerId>)>, RepositoryError> {
        let row = sqlx::query_as::<_, AuthRow>(
            r"
            SELECT u.id, u.email, u.password_hash, u.role,
                   c.id AS customer_id,
                   u.created_at, u.updated_at
            FROM user_account u
            LEFT JOIN customer c ON c.user_id = u.id
            WHERE u.email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash = row.password_hash.clone();
        let customer_id = row.customer_id.map(CustomerId::new);
        let user = UserRow {
            id: row.id,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
        .try_into()?;

        Ok(Some((user, password_hash, customer_id)))
    }

    /// Create a customer account: user row plus its paired customer profile,
    /// in one transaction.
    ///
    /// Registration always assigns the `customer` role and exactly one
    /// profile row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_customer_account(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<(User, Customer), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO user_account (email, password_hash, role)
            VALUES ($1, $2, 'customer')
            RETURNING id, email, role, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let customer_row = sqlx::query_as::<_, super::customers::CustomerRow>(
            r"
            INSERT INTO customer (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, phone, avatar_url, created_at, updated_at
            ",
        )
        .bind(user_row.id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user_row.try_into()?, customer_row.try_into()?))
    }

    /// Create an admin account (used by the management CLI).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO user_account (email, password_hash, role)
            VALUES ($1, $2, 'admin')
            RETURNING id, email, role, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }
}
