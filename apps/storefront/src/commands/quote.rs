//! # Quote Commands
//!
//! Custom-sign quote requests from the contact page.

use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::DbState;
use signboard_core::validation::validate_quote;
use signboard_core::{QuoteForm, QuoteRequest};

/// Validates and stores a quote request.
///
/// Every broken field is reported at once; nothing is stored unless the
/// whole form passes.
pub async fn submit_quote(db: &DbState, form: QuoteForm) -> ApiResult<QuoteRequest> {
    debug!(project_type = %form.project_type, "submit_quote command");

    validate_quote(&form)?;

    let request = db.inner().quotes().insert(&form).await?;
    info!(quote_id = %request.id, "Quote request received");
    Ok(request)
}

/// Most recent quote requests, newest first.
pub async fn list_quotes(db: &DbState, limit: u32) -> ApiResult<Vec<QuoteRequest>> {
    Ok(db.inner().quotes().list_recent(limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use signboard_core::QuoteStatus;
    use signboard_db::{Database, DbConfig};

    fn form() -> QuoteForm {
        QuoteForm {
            name: "Bruno Costa".to_string(),
            email: "bruno@bakery.com".to_string(),
            phone: "5559876543".to_string(),
            company: Some("Costa Bakery".to_string()),
            project_type: "facade".to_string(),
            description: "Backlit facade sign, about 4m wide, for a bakery".to_string(),
            budget: "5000+".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_quote_stores_pending_request() {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());

        let request = submit_quote(&db, form()).await.unwrap();
        assert_eq!(request.status, QuoteStatus::Pending);
        assert_eq!(request.company.as_deref(), Some("Costa Bakery"));

        let recent = list_quotes(&db, 5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, request.id);
    }

    #[tokio::test]
    async fn test_invalid_quote_reports_all_fields() {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());

        let mut bad = form();
        bad.description = "Too short".to_string();
        bad.budget = "  ".to_string();

        let err = submit_quote(&db, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.fields, vec!["description", "budget"]);
        assert!(list_quotes(&db, 5).await.unwrap().is_empty());
    }
}
