//! # Quote Repository
//!
//! Custom-sign quote requests. Stored as submitted, status `pending`.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use signboard_core::{normalize_email, QuoteForm, QuoteRequest, QuoteStatus};

#[derive(Debug, FromRow)]
struct QuoteRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    company: Option<String>,
    project_type: String,
    description: String,
    budget: String,
    status: QuoteStatus,
    created_at: DateTime<Utc>,
}

impl From<QuoteRow> for QuoteRequest {
    fn from(row: QuoteRow) -> Self {
        QuoteRequest {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            project_type: row.project_type,
            description: row.description,
            budget: row.budget,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Repository for quote requests.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QuoteRepository { pool }
    }

    /// Stores a quote request. The form is expected to be validated already.
    pub async fn insert(&self, form: &QuoteForm) -> DbResult<QuoteRequest> {
        let request = QuoteRequest {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            email: normalize_email(&form.email),
            phone: form.phone.trim().to_string(),
            company: form
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            project_type: form.project_type.trim().to_string(),
            description: form.description.trim().to_string(),
            budget: form.budget.trim().to_string(),
            status: QuoteStatus::Pending,
            created_at: Utc::now(),
        };

        debug!(id = %request.id, project_type = %request.project_type, "Inserting quote request");

        sqlx::query(
            r#"
            INSERT INTO quote_requests (
                id, name, email, phone, company, project_type,
                description, budget, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&request.id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company)
        .bind(&request.project_type)
        .bind(&request.description)
        .bind(&request.budget)
        .bind(request.status)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        Ok(request)
    }

    /// Lists the most recent quote requests.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<QuoteRequest>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, company, project_type,
                   description, budget, status, created_at
            FROM quote_requests
            ORDER BY rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuoteRequest::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn form(name: &str) -> QuoteForm {
        QuoteForm {
            name: name.to_string(),
            email: "Buyer@Shop.com".to_string(),
            phone: "5551234567".to_string(),
            company: Some("  ".to_string()),
            project_type: "storefront".to_string(),
            description: "Illuminated channel letters for a bakery".to_string(),
            budget: "1000-5000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_recent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = db.quotes().insert(&form("First")).await.unwrap();
        let second = db.quotes().insert(&form("Second")).await.unwrap();

        assert_eq!(first.status, QuoteStatus::Pending);
        assert_eq!(first.email, "buyer@shop.com");
        assert_eq!(first.company, None);

        let recent = db.quotes().list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].status, QuoteStatus::Pending);
    }
}
