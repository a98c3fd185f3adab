//! Order management route handlers (admin).
//!
//! The create form submits several order lines at once as repeated
//! `product_id`/`status` field pairs; blank lines are ignored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use thiserror::Error;

use orderdesk_core::{CustomerId, OrderId, OrderStatus, ProductId};

use crate::db::{CustomerRepository, NewOrder, OrderRepository, ProductRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, Customer, Order, Product};
use crate::state::AppState;

/// Number of blank lines on the create form.
const CREATE_FORM_LINES: usize = 5;

/// Update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub product_id: i32,
    pub status: String,
    pub note: Option<String>,
}

// =============================================================================
// Formset Parsing
// =============================================================================

/// Errors from the multi-line create form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderFormError {
    /// A product value was not a number.
    #[error("invalid product selection")]
    BadProduct,
    /// A status value was not a known status.
    #[error("invalid status selection")]
    BadStatus,
    /// Every submitted line was blank.
    #[error("no order lines were filled in")]
    Empty,
}

/// Parse repeated `product_id`/`status` pairs into order lines.
///
/// Field pairs are matched by position. Lines with an empty product are
/// skipped; an empty status on a kept line defaults to pending.
pub fn parse_order_rows(pairs: &[(String, String)]) -> Result<Vec<NewOrder>, OrderFormError> {
    let products: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "product_id")
        .map(|(_, v)| v.as_str())
        .collect();
    let statuses: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "status")
        .map(|(_, v)| v.as_str())
        .collect();

    let mut lines = Vec::new();
    for (i, product) in products.iter().enumerate() {
        if product.is_empty() {
            continue;
        }
        let product_id: i32 = product.parse().map_err(|_| OrderFormError::BadProduct)?;

        let status = match statuses.get(i).copied().unwrap_or("") {
            "" => OrderStatus::Pending,
            s => s.parse().map_err(|_| OrderFormError::BadStatus)?,
        };

        lines.push(NewOrder {
            product_id: ProductId::new(product_id),
            status,
        });
    }

    if lines.is_empty() {
        return Err(OrderFormError::Empty);
    }

    Ok(lines)
}

// =============================================================================
// Templates
// =============================================================================

/// Order create form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/form.html")]
pub struct OrderCreateTemplate {
    pub current_user: CurrentUser,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
    pub line_count: usize,
    pub error: Option<String>,
}

/// Order edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/edit.html")]
pub struct OrderEditTemplate {
    pub current_user: CurrentUser,
    pub order: Order,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
}

/// Order delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/delete.html")]
pub struct OrderDeleteTemplate {
    pub current_user: CurrentUser,
    pub order: Order,
}

// =============================================================================
// Handlers
// =============================================================================

async fn load_customer(state: &AppState, id: i32) -> Result<Customer, AppError> {
    CustomerRepository::new(state.pool())
        .get_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

async fn load_order(state: &AppState, id: i32) -> Result<Order, AppError> {
    OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Display the multi-line order create form for one customer.
pub async fn create_form(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    axum::extract::Query(query): axum::extract::Query<super::auth::MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customer = load_customer(&state, customer_id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(OrderCreateTemplate {
        current_user,
        customer,
        products,
        statuses: OrderStatus::ALL.to_vec(),
        line_count: CREATE_FORM_LINES,
        error: query
            .error
            .map(|_| "Please fill in at least one valid order line.".to_owned()),
    })
}

/// Handle the order create form: insert every filled-in line.
pub async fn create(
    RequireAdmin(_current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let customer = load_customer(&state, customer_id).await?;

    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed form body: {e}")))?;

    let lines = match parse_order_rows(&pairs) {
        Ok(lines) => lines,
        Err(OrderFormError::Empty) => {
            let url = format!("/order/create/{}?error=empty", customer.id.as_i32());
            return Ok(Redirect::to(&url).into_response());
        }
        Err(e) => return Err(AppError::BadRequest(e.to_string())),
    };

    OrderRepository::new(state.pool())
        .create_many(customer.id, &lines)
        .await?;

    Ok(Redirect::to("/").into_response())
}

/// Display the edit form for one order.
pub async fn update_form(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = load_order(&state, id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(OrderEditTemplate {
        current_user,
        order,
        products,
        statuses: OrderStatus::ALL.to_vec(),
    })
}

/// Handle the order edit form.
pub async fn update(
    RequireAdmin(_current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<UpdateForm>,
) -> Result<Response, AppError> {
    let order = load_order(&state, id).await?;

    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|_| AppError::BadRequest("invalid status selection".to_owned()))?;

    let note = form
        .note
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    OrderRepository::new(state.pool())
        .update(order.id, ProductId::new(form.product_id), status, note)
        .await?;

    Ok(Redirect::to("/").into_response())
}

/// Display the delete confirmation page for one order.
pub async fn delete_confirm(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = load_order(&state, id).await?;

    Ok(OrderDeleteTemplate {
        current_user,
        order,
    })
}

/// Handle the delete confirmation: remove the order.
pub async fn delete(
    RequireAdmin(_current_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let order = load_order(&state, id).await?;

    OrderRepository::new(state.pool()).delete(order.id).await?;

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn filled_lines_are_parsed_in_order() {
        let form = pairs(&[
            ("product_id", "3"),
            ("status", "pending"),
            ("product_id", "7"),
            ("status", "delivered"),
        ]);
        let lines = parse_order_rows(&form).expect("parse");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, ProductId::new(3));
        assert_eq!(lines[0].status, OrderStatus::Pending);
        assert_eq!(lines[1].product_id, ProductId::new(7));
        assert_eq!(lines[1].status, OrderStatus::Delivered);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let form = pairs(&[
            ("product_id", ""),
            ("status", "pending"),
            ("product_id", "2"),
            ("status", "out_for_delivery"),
            ("product_id", ""),
            ("status", ""),
        ]);
        let lines = parse_order_rows(&form).expect("parse");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, ProductId::new(2));
        assert_eq!(lines[0].status, OrderStatus::OutForDelivery);
    }

    #[test]
    fn empty_status_defaults_to_pending() {
        let form = pairs(&[("product_id", "1"), ("status", "")]);
        let lines = parse_order_rows(&form).expect("parse");
        assert_eq!(lines[0].status, OrderStatus::Pending);
    }

    #[test]
    fn all_blank_lines_is_an_error() {
        let form = pairs(&[("product_id", ""), ("status", ""), ("product_id", "")]);
        assert_eq!(parse_order_rows(&form), Err(OrderFormError::Empty));
    }

    #[test]
    fn non_numeric_product_is_rejected() {
        let form = pairs(&[("product_id", "abc"), ("status", "pending")]);
        assert_eq!(parse_order_rows(&form), Err(OrderFormError::BadProduct));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let form = pairs(&[("product_id", "1"), ("status", "lost_in_transit")]);
        assert_eq!(parse_order_rows(&form), Err(OrderFormError::BadStatus));
    }
}
