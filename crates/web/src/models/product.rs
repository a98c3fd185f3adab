//! Product catalog domain type.

use chrono::{DateTime, Utc};

use orderdesk_core::{Price, ProductId};

/// A catalog item.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Free-text category label.
    pub category: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
