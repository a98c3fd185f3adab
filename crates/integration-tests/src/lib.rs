//! Integration tests for Orderdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p orderdesk-cli -- migrate
//!
//! # Create the admin account the tests sign in with
//! cargo run -p orderdesk-cli -- admin create -e admin@example.com -p "integration tests"
//!
//! # Start the server
//! cargo run -p orderdesk-web
//!
//! # Run the ignored integration tests
//! cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_BASE_URL` - Server base URL (default `http://localhost:3000`)
//! - `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD` - Admin credentials

use reqwest::{Client, redirect::Policy};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ORDERDESK_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// Admin credentials for tests that need a staff session.
#[must_use]
pub fn admin_credentials() -> (String, String) {
    let email =
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_owned());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "integration tests".to_owned());
    (email, password)
}

/// A fresh email address for registration tests.
#[must_use]
pub fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

/// Cookie-holding client that follows redirects.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Cookie-holding client that does NOT follow redirects, for asserting on
/// redirect targets.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a customer account through the public form.
///
/// # Panics
///
/// Panics if the request fails.
pub async fn register_customer(client: &Client, email: &str, password: &str, name: &str) {
    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("name", name),
            ("email", email),
            ("password", password),
            ("password_confirm", password),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "Registration failed with status {}",
        resp.status()
    );
}

/// Sign in through the login form, leaving the session cookie on the client.
///
/// # Panics
///
/// Panics if the request fails.
pub async fn login(client: &Client, email: &str, password: &str) {
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to submit login");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "Login failed with status {}",
        resp.status()
    );
}
