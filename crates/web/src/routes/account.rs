//! Customer portal route handlers.
//!
//! The signed-in customer's own pages: order overview and profile settings.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::db::{CustomerRepository, OrderRepository, StatusCounts};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::models::{CurrentUser, Customer, Order};
use crate::state::AppState;

use super::auth::MessageQuery;

/// Settings form data.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub name: String,
    pub phone: String,
    pub avatar_url: Option<String>,
}

/// Customer portal home template.
#[derive(Template, WebTemplate)]
#[template(path = "account/user.html")]
pub struct UserTemplate {
    pub current_user: CurrentUser,
    pub customer: Customer,
    pub orders: Vec<Order>,
    pub counts: StatusCounts,
}

/// Profile settings template.
#[derive(Template, WebTemplate)]
#[template(path = "account/settings.html")]
pub struct SettingsTemplate {
    pub current_user: CurrentUser,
    pub customer: Customer,
    pub success: Option<String>,
}

/// Resolve the signed-in customer's profile.
///
/// A customer-role session without a paired profile row means the account
/// data is broken, not that the page is missing.
async fn own_profile(state: &AppState, user: &CurrentUser) -> Result<Customer, AppError> {
    let customer_id = user
        .customer_id
        .ok_or_else(|| AppError::Internal("customer session without profile".to_owned()))?;

    CustomerRepository::new(state.pool())
        .get_by_id(customer_id)
        .await?
        .ok_or_else(|| AppError::Internal("customer profile missing".to_owned()))
}

/// Display the customer's own orders and order statistics.
pub async fn user_page(
    RequireCustomer(current_user): RequireCustomer,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customer = own_profile(&state, &current_user).await?;

    let orders = OrderRepository::new(state.pool());
    let own_orders = orders
        .list_for_customer(customer.id, &crate::db::OrderFilter::default())
        .await?;
    let counts = orders.status_counts_for_customer(customer.id).await?;

    Ok(UserTemplate {
        current_user,
        customer,
        orders: own_orders,
        counts,
    })
}

/// Display the profile settings form.
pub async fn settings_page(
    RequireCustomer(current_user): RequireCustomer,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customer = own_profile(&state, &current_user).await?;

    Ok(SettingsTemplate {
        current_user,
        customer,
        success: query.success.map(|_| "Profile updated.".to_owned()),
    })
}

/// Handle the profile settings form submission.
pub async fn update_settings(
    RequireCustomer(current_user): RequireCustomer,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let customer = own_profile(&state, &current_user).await?;

    let avatar_url = form
        .avatar_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    CustomerRepository::new(state.pool())
        .update_profile(customer.id, form.name.trim(), form.phone.trim(), avatar_url)
        .await?;

    Ok(Redirect::to("/account/settings?success=updated").into_response())
}
