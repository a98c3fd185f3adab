//! Customer detail route handler (admin).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

use orderdesk_core::{CustomerId, OrderStatus};

use crate::db::{CustomerRepository, OrderFilter, OrderRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, Customer, Order, Product};
use crate::state::AppState;

/// Customer detail template: profile, filtered orders, and the filter form.
#[derive(Template, WebTemplate)]
#[template(path = "customers/detail.html")]
pub struct CustomerDetailTemplate {
    pub current_user: CurrentUser,
    pub customer: Customer,
    pub orders: Vec<Order>,
    /// Total order count, independent of the active filter.
    pub order_count: i64,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
    pub filter: OrderFilter,
}

/// Display one customer's profile with a filterable order list.
///
/// The filter narrows the displayed orders only; the order count next to
/// the profile always reflects the customer's full history.
pub async fn show(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(filter): Query<OrderFilter>,
) -> Result<impl IntoResponse, AppError> {
    let customer_id = CustomerId::new(id);

    let customer = CustomerRepository::new(state.pool())
        .get_by_id(customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    let orders = OrderRepository::new(state.pool());
    let filtered = orders.list_for_customer(customer_id, &filter).await?;
    let order_count = orders.count_for_customer(customer_id).await?;

    let products = crate::db::ProductRepository::new(state.pool())
        .list_all()
        .await?;

    Ok(CustomerDetailTemplate {
        current_user,
        customer,
        orders: filtered,
        order_count,
        products,
        statuses: OrderStatus::ALL.to_vec(),
        filter,
    })
}
