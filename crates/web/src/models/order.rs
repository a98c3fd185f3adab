//! Order domain type.

use chrono::{DateTime, Utc};

use orderdesk_core::{CustomerId, OrderId, OrderStatus, ProductId};

/// An order, joined with the names of its customer and product.
///
/// Every order references exactly one existing customer and one existing
/// product; the repository always fetches the joined names so templates
/// never need a second lookup.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Ordering customer.
    pub customer_id: CustomerId,
    /// Ordering customer's display name.
    pub customer_name: String,
    /// Ordered product.
    pub product_id: ProductId,
    /// Ordered product's name.
    pub product_name: String,
    /// Delivery status.
    pub status: OrderStatus,
    /// Optional free-text note.
    pub note: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
