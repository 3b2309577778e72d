//! # Customer Repository
//!
//! Shopper accounts. Emails are stored normalized (trimmed, lowercase) and
//! are unique, so lookups are case-insensitive by construction.
//!
//! The connection-level helpers are shared with [`super::order`] so that a
//! first-time shopper's account is created inside the order transaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use signboard_core::{normalize_email, Customer};

/// Data for a customer that does not exist yet.
///
/// `password_hash` is produced by the caller; this crate never sees a
/// plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String,
    full_name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for customer accounts.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Finds a customer by email, ignoring case and surrounding spaces.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let mut conn = self.pool.acquire().await?;
        find_by_email(&mut conn, email).await
    }

    /// Creates a customer.
    ///
    /// ## Errors
    /// [`DbError::UniqueViolation`] if the email is already registered.
    pub async fn insert(&self, new: &NewCustomer) -> DbResult<Customer> {
        let mut conn = self.pool.acquire().await?;
        insert(&mut conn, new).await
    }
}

pub(crate) async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> DbResult<Option<Customer>> {
    let row: Option<CustomerRow> = sqlx::query_as(
        r#"
        SELECT id, full_name, email, phone, company, password_hash, created_at, updated_at
        FROM customers
        WHERE email = ?1
        "#,
    )
    .bind(normalize_email(email))
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Customer::from))
}

pub(crate) async fn insert(conn: &mut SqliteConnection, new: &NewCustomer) -> DbResult<Customer> {
    let now = Utc::now();
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        full_name: new.full_name.trim().to_string(),
        email: normalize_email(&new.email),
        phone: new.phone.clone(),
        company: new.company.clone(),
        password_hash: new.password_hash.clone(),
        created_at: now,
        updated_at: now,
    };

    debug!(id = %customer.id, "Inserting customer");

    sqlx::query(
        r#"
        INSERT INTO customers (
            id, full_name, email, phone, company, password_hash, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&customer.id)
    .bind(&customer.full_name)
    .bind(&customer.email)
    .bind(&customer.phone)
    .bind(&customer.company)
    .bind(&customer.password_hash)
    .bind(customer.created_at)
    .bind(customer.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| match DbError::from(e) {
        DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
            field,
            value: customer.email.clone(),
        },
        other => other,
    })?;

    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn ana() -> NewCustomer {
        NewCustomer {
            full_name: " Ana Lima ".to_string(),
            email: " Ana@Example.com".to_string(),
            phone: Some("5551234567".to_string()),
            company: None,
            password_hash: Some("$argon2id$stub".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_normalizes_and_finds_case_insensitively() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let created = db.customers().insert(&ana()).await.unwrap();

        assert_eq!(created.email, "ana@example.com");
        assert_eq!(created.full_name, "Ana Lima");

        let found = db
            .customers()
            .find_by_email("ANA@EXAMPLE.COM ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash.as_deref(), Some("$argon2id$stub"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers().insert(&ana()).await.unwrap();

        let err = db.customers().insert(&ana()).await.unwrap_err();
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "ana@example.com"),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }
}
