//! Order repository and query-string filter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, de};
use sqlx::{PgPool, Postgres, QueryBuilder};

use orderdesk_core::{CustomerId, OrderId, OrderStatus, ProductId};

use super::RepositoryError;
use crate::models::Order;

/// Shared SELECT clause: orders joined with customer and product names.
const ORDER_SELECT: &str = r"
SELECT o.id, o.customer_id, c.name AS customer_name,
       o.product_id, p.name AS product_name,
       o.status, o.note, o.created_at
FROM orders o
JOIN customer c ON c.id = o.customer_id
JOIN product p ON p.id = o.product_id";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    customer_name: String,
    product_id: i32,
    product_name: String,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&row.status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            customer_name: row.customer_name,
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            status,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

/// Aggregate order counts for dashboards.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct StatusCounts {
    /// All orders in scope.
    pub total: i64,
    /// Orders still pending.
    pub pending: i64,
    /// Orders already delivered.
    pub delivered: i64,
}

/// Query-string filter over one customer's orders.
///
/// Provided, non-empty fields are ANDed together; absent fields impose no
/// constraint. An unrecognised status value counts as absent. Results keep
/// the store's insertion (id) order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    /// Delivery status, stored value or label (see [`OrderFilter::status`]).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    /// Product ID.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub product: Option<i32>,
    /// Inclusive lower bound on the order date.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the order date.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_to: Option<NaiveDate>,
}

impl OrderFilter {
    /// The status constraint, if a valid one was supplied.
    ///
    /// Accepts both the stored value (`delivered`) and the human-readable
    /// label (`Delivered`), case-insensitively; hand-edited URLs tend to
    /// carry the label shown on the page.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        let raw = self.status.as_deref()?;
        OrderStatus::ALL.into_iter().find(|s| {
            raw.eq_ignore_ascii_case(s.as_str()) || raw.eq_ignore_ascii_case(s.label())
        })
    }

    /// Whether the filter selects the given status (template helper).
    #[must_use]
    pub fn selects(&self, status: &OrderStatus) -> bool {
        self.status() == Some(*status)
    }

    /// Whether the filter selects the given product ID (template helper).
    #[must_use]
    pub fn product_is(&self, id: i32) -> bool {
        self.product == Some(id)
    }
}

/// Deserialize an optional form/query field, treating the empty string as
/// absent (HTML forms submit empty inputs as `key=`).
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Build the filtered, customer-scoped order query.
///
/// Separate from the repository so the SQL assembly is testable without a
/// database connection.
fn filtered_query(
    customer_id: CustomerId,
    filter: &OrderFilter,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(ORDER_SELECT);
    qb.push(" WHERE o.customer_id = ");
    qb.push_bind(customer_id.as_i32());

    if let Some(status) = filter.status() {
        qb.push(" AND o.status = ");
        qb.push_bind(status.to_string());
    }
    if let Some(product) = filter.product {
        qb.push(" AND o.product_id = ");
        qb.push_bind(product);
    }
    if let Some(from) = filter.date_from {
        qb.push(" AND o.created_at >= ");
        qb.push_bind(from);
    }
    // Upper bound is inclusive of the whole day. Past the last
    // representable date there is no next day to bound by, so clamp.
    if let Some(to) = filter.date_to {
        let next_day = to
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX);
        qb.push(" AND o.created_at < ");
        qb.push_bind(next_day);
    }

    qb.push(" ORDER BY o.id");
    qb
}

/// A new order line from the create formset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Initial delivery status.
    pub status: OrderStatus,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order in the store, insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{ORDER_SELECT} ORDER BY o.id"))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List one customer's orders, restricted by the query-string filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut qb = filtered_query(customer_id, filter);
        let rows = qb
            .build_query_as::<OrderRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{ORDER_SELECT} WHERE o.id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Unfiltered order count for one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_customer(&self, customer_id: CustomerId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(customer_id.as_i32())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Status breakdown across all orders (admin dashboard).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status_counts(&self) -> Result<StatusCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                   COUNT(*) FILTER (WHERE status = 'delivered') AS delivered
            FROM orders
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }

    /// Status breakdown for one customer (customer portal).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status_counts_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<StatusCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                   COUNT(*) FILTER (WHERE status = 'delivered') AS delivered
            FROM orders
            WHERE customer_id = $1
            ",
        )
        .bind(customer_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }

    /// Insert a batch of orders for one customer in a single transaction
    /// (the create formset submits several lines at once).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; no rows are
    /// kept in that case.
    pub async fn create_many(
        &self,
        customer_id: CustomerId,
        lines: &[NewOrder],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO orders (customer_id, product_id, status)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(customer_id.as_i32())
            .bind(line.product_id.as_i32())
            .bind(line.status.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Update an order's product, status, and note.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OrderId,
        product_id: ProductId,
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET product_id = $1, status = $2, note = $3
            WHERE id = $4
            ",
        )
        .bind(product_id.as_i32())
        .bind(status.to_string())
        .bind(note)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(filter: &OrderFilter) -> String {
        filtered_query(CustomerId::new(1), filter).sql().to_string()
    }

    #[test]
    fn empty_filter_only_scopes_by_customer() {
        let sql = sql_for(&OrderFilter::default());
        assert!(sql.contains("WHERE o.customer_id = $1"));
        assert!(!sql.contains("o.status"));
        assert!(!sql.contains("o.product_id ="));
        assert!(!sql.contains("o.created_at"));
        assert!(sql.ends_with("ORDER BY o.id"));
    }

    #[test]
    fn status_filter_adds_one_clause() {
        let filter = OrderFilter {
            status: Some("delivered".to_string()),
            ..OrderFilter::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains("AND o.status = $2"));
        assert!(!sql.contains("$3"));
    }

    #[test]
    fn status_filter_accepts_display_labels() {
        // Links and hand-typed URLs carry the on-page label, not the
        // stored value; both must constrain the query.
        let filter: OrderFilter =
            serde_urlencoded::from_str("status=Delivered").expect("deserialize");
        assert_eq!(filter.status(), Some(OrderStatus::Delivered));
        assert!(sql_for(&filter).contains("AND o.status = $2"));

        let filter = OrderFilter {
            status: Some("Out for delivery".to_string()),
            ..OrderFilter::default()
        };
        assert_eq!(filter.status(), Some(OrderStatus::OutForDelivery));
    }

    #[test]
    fn unknown_status_counts_as_absent() {
        let filter = OrderFilter {
            status: Some("Shipped".to_string()),
            ..OrderFilter::default()
        };
        assert_eq!(filter.status(), None);
        assert!(!sql_for(&filter).contains("o.status ="));
    }

    #[test]
    fn all_fields_compose_with_and() {
        let filter = OrderFilter {
            status: Some("pending".to_string()),
            product: Some(4),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let sql = sql_for(&filter);
        assert!(sql.contains("AND o.status = $2"));
        assert!(sql.contains("AND o.product_id = $3"));
        assert!(sql.contains("AND o.created_at >= $4"));
        assert!(sql.contains("AND o.created_at < $5"));
    }

    #[test]
    fn max_date_to_keeps_the_upper_bound() {
        let filter = OrderFilter {
            date_to: Some(NaiveDate::MAX),
            ..OrderFilter::default()
        };
        assert!(sql_for(&filter).contains("AND o.created_at < $2"));
    }

    #[test]
    fn filter_deserializes_empty_fields_as_absent() {
        let filter: OrderFilter =
            serde_urlencoded::from_str("status=&product=&date_from=&date_to=")
                .expect("deserialize");
        assert!(filter.status.is_none());
        assert!(filter.product.is_none());
        assert!(filter.date_from.is_none());
        assert!(filter.date_to.is_none());
    }

    #[test]
    fn filter_deserializes_provided_fields() {
        let filter: OrderFilter =
            serde_urlencoded::from_str("status=delivered&product=2&date_from=2024-03-01")
                .expect("deserialize");
        assert_eq!(filter.status(), Some(OrderStatus::Delivered));
        assert_eq!(filter.product, Some(2));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 3, 1));
    }
}
