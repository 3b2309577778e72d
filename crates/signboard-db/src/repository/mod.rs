//! # Repository Module
//!
//! One repository per aggregate. Each is a thin wrapper over a cloned
//! `SqlitePool`, handed out by [`crate::Database`].
//!
//! ```text
//! storefront command
//!      │  db.orders().place(&new_order, Some(&new_customer))
//!      ▼
//! OrderRepository ──► BEGIN; customers?; orders; order_items; COMMIT
//!      │
//!      ▼
//! SQLite
//! ```
//!
//! - [`catalog::CatalogRepository`] - product listing and lookup
//! - [`customer::CustomerRepository`] - shopper accounts
//! - [`order::OrderRepository`] - transactional order placement
//! - [`quote::QuoteRepository`] - quote requests

pub mod catalog;
pub mod customer;
pub mod order;
pub mod quote;

use crate::error::{DbError, DbResult};
use signboard_core::Money;

/// Converts a stored cents column into [`Money`], rejecting negatives.
pub(crate) fn money_column(column: &str, cents: i64) -> DbResult<Money> {
    if cents < 0 {
        return Err(DbError::CorruptData {
            column: column.to_string(),
            reason: format!("negative amount {cents}"),
        });
    }
    Ok(Money::from_cents(cents))
}

