//! Product catalog route handler (admin).

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub current_user: CurrentUser,
    pub products: Vec<Product>,
}

/// Display the full product catalog.
pub async fn index(
    RequireAdmin(current_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(ProductsTemplate {
        current_user,
        products,
    })
}
