//! # Order Repository
//!
//! Order placement and lookup.
//!
//! ## Placement Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place(&NewOrder, Option<&NewCustomer>)                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    ├── INSERT customers        (first-time shopper only)               │
//! │    ├── next invoice for today  INV-YYYYMMDD-NNNNNN                     │
//! │    ├── INSERT orders           status = pending                        │
//! │    └── INSERT order_items      one per cart line, line_no 1..n         │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure rolls everything back: no order without its items, and    │
//! │  no account created for an order that was never stored.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{customer, money_column};
use crate::error::{DbError, DbResult};
use crate::repository::customer::NewCustomer;
use signboard_core::{
    normalize_email, NewOrder, Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress,
    INVOICE_PREFIX,
};

const ORDER_COLUMNS: &str = "id, invoice_number, customer_id, customer_name, customer_email, \
     customer_phone, total_cents, payment_method, shipping_address, notes, status, \
     created_at, updated_at";

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    invoice_number: String,
    customer_id: Option<String>,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    total_cents: i64,
    payment_method: PaymentMethod,
    shipping_address: String,
    notes: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> DbResult<Order> {
        let shipping_address: ShippingAddress = serde_json::from_str(&self.shipping_address)
            .map_err(|e| DbError::CorruptData {
                column: "orders.shipping_address".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Order {
            total: money_column("orders.total_cents", self.total_cents)?,
            id: self.id,
            invoice_number: self.invoice_number,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            payment_method: self.payment_method,
            shipping_address,
            notes: self.notes,
            status: self.status,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    product_id: String,
    name: String,
    quantity: i64,
    price_cents: i64,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = DbError;

    fn try_from(row: OrderItemRow) -> DbResult<Self> {
        Ok(OrderItem {
            price: money_column("order_items.price_cents", row.price_cents)?,
            total: money_column("order_items.total_cents", row.total_cents)?,
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            name: row.name,
            quantity: row.quantity,
            created_at: row.created_at,
        })
    }
}

/// Repository for orders and their items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores an order and all its lines atomically.
    ///
    /// When `new_customer` is given, the account is created in the same
    /// transaction and the order is linked to it; otherwise
    /// `order.customer_id` is used as is.
    ///
    /// ## Errors
    /// - [`DbError::ConstraintViolation`] for an order with no lines
    /// - [`DbError::UniqueViolation`] if the customer email was taken meanwhile
    /// - connection / transaction errors from the pool
    pub async fn place(
        &self,
        order: &NewOrder,
        new_customer: Option<&NewCustomer>,
    ) -> DbResult<Order> {
        if order.lines.is_empty() {
            return Err(DbError::ConstraintViolation {
                message: "order has no items".to_string(),
            });
        }

        let shipping_json = serde_json::to_string(&order.shipping_address)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let customer_id = match new_customer {
            Some(new) => Some(customer::insert(&mut tx, new).await?.id),
            None => order.customer_id.clone(),
        };

        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();
        let invoice_number = next_invoice_number(&mut tx, now).await?;

        debug!(
            id = %order_id,
            invoice_number = %invoice_number,
            lines = order.lines.len(),
            total_cents = order.total.cents(),
            "Inserting order"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, invoice_number, customer_id, customer_name, customer_email,
                customer_phone, total_cents, payment_method, shipping_address,
                notes, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&order_id)
        .bind(&invoice_number)
        .bind(&customer_id)
        .bind(&order.customer_name)
        .bind(normalize_email(&order.customer_email))
        .bind(&order.customer_phone)
        .bind(order.total.cents())
        .bind(order.payment_method)
        .bind(&shipping_json)
        .bind(&order.notes)
        .bind(OrderStatus::Pending)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (index, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, line_no, product_id, name,
                    quantity, price_cents, total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(index as i64 + 1)
            .bind(&line.product_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price.cents())
            .bind(line.total().cents())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %order_id, invoice_number = %invoice_number, "Order placed");

        self.get_by_id(&order_id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", &order_id))
    }

    /// Gets an order with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let items = self.get_items(&row.id).await?;
                row.into_order(items).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Gets an order by its invoice number.
    pub async fn get_by_invoice(&self, invoice_number: &str) -> DbResult<Option<Order>> {
        let id: Option<String> =
            sqlx::query_scalar("SELECT id FROM orders WHERE invoice_number = ?1")
                .bind(invoice_number)
                .fetch_optional(&self.pool)
                .await?;

        match id {
            Some(id) => self.get_by_id(&id).await,
            None => Ok(None),
        }
    }

    /// Lists a shopper's orders, newest first.
    ///
    /// Invoice numbers sort chronologically, so they order the listing.
    pub async fn list_by_email(&self, email: &str, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_email = ?1 \
             ORDER BY invoice_number DESC LIMIT ?2"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(normalize_email(email))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(&row.id).await?;
            orders.push(row.into_order(items)?);
        }
        Ok(orders)
    }

    /// Gets the items of an order in cart order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, name, quantity, price_cents, total_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }
}

/// Next invoice number for the UTC day of `now`.
///
/// Format: `INV-YYYYMMDD-NNNNNN`, the sequence restarting at 1 each day.
/// Runs inside the placement transaction; the UNIQUE index on
/// `invoice_number` rejects a concurrent writer that read the same maximum.
async fn next_invoice_number(conn: &mut SqliteConnection, now: DateTime<Utc>) -> DbResult<String> {
    let prefix = format!("{}-{}-", INVOICE_PREFIX, now.format("%Y%m%d"));

    let last: Option<String> = sqlx::query_scalar(
        "SELECT invoice_number FROM orders WHERE invoice_number LIKE ?1 \
         ORDER BY invoice_number DESC LIMIT 1",
    )
    .bind(format!("{prefix}%"))
    .fetch_optional(&mut *conn)
    .await?;

    let seq = last
        .as_deref()
        .and_then(|s| s.strip_prefix(&prefix))
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(0)
        + 1;

    Ok(format_invoice_number(&prefix, seq))
}

fn format_invoice_number(prefix: &str, seq: u32) -> String {
    format!("{prefix}{seq:06}")
}

// =============================================================================
// Unit Tests
// =============================================================================
