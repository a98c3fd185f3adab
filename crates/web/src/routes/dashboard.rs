//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::db::{CustomerRepository, OrderRepository, StatusCounts};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, Customer, Order};
use crate::state::AppState;

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: CurrentUser,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub customer_count: i64,
    pub counts: StatusCounts,
}

/// Display the admin dashboard: all orders, the customer list, and
/// store-wide order statistics.
pub async fn index(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = OrderRepository::new(state.pool());
    let customers = CustomerRepository::new(state.pool());

    let all_orders = orders.list_all().await?;
    let counts = orders.status_counts().await?;
    let all_customers = customers.list_all().await?;
    let customer_count = customers.count().await?;

    Ok(DashboardTemplate {
        current_user,
        orders: all_orders,
        customers: all_customers,
        customer_count,
        counts,
    })
}
