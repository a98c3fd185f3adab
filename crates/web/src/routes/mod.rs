//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Registration page
//! POST /register                - Registration action
//! GET  /logout                  - Logout
//!
//! # Admin
//! GET  /                        - Dashboard (orders, customers, stats)
//! GET  /products                - Product catalog
//! GET  /customer/{id}           - Customer detail with filterable orders
//! GET  /order/create/{customer_id} - Multi-line order create form
//! POST /order/create/{customer_id} - Create orders
//! GET  /order/update/{id}       - Order edit form
//! POST /order/update/{id}       - Update order
//! GET  /order/delete/{id}       - Delete confirmation
//! POST /order/delete/{id}       - Delete order
//!
//! # Customer portal
//! GET  /user                    - Own orders and statistics
//! GET  /account/settings        - Profile settings form
//! POST /account/settings        - Update profile
//! ```

pub mod account;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::state::AppState;

/// Liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness check: verifies the database connection.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.pool())
        .await
    {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::error!("Readiness check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/products", get(products::index))
        .route("/customer/{id}", get(customers::show))
        .route(
            "/order/create/{customer_id}",
            get(orders::create_form).post(orders::create),
        )
        .route(
            "/order/update/{id}",
            get(orders::update_form).post(orders::update),
        )
        .route(
            "/order/delete/{id}",
            get(orders::delete_confirm).post(orders::delete),
        )
}

/// Create the customer portal routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(account::user_page))
        .route(
            "/account/settings",
            get(account::settings_page).post(account::update_settings),
        )
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health_ready))
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(account_routes())
}
