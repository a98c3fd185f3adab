//! Admin account management command.
//!
//! # Usage
//!
//! ```bash
//! orderdesk admin create -e admin@example.com -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use orderdesk_web::db;
use orderdesk_web::services::AuthService;

use super::{CommandError, database_url};

/// Create a new admin account.
///
/// The password is validated and hashed by the same service the web
/// application uses for registration.
///
/// # Errors
///
/// Returns an error if the email is invalid, the password is too weak,
/// an account with the email already exists, or the database fails.
pub async fn create(email: &str, password: &str) -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let user = AuthService::new(&pool).create_admin(email, password).await?;

    tracing::info!(
        "Admin account created. ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(())
}
