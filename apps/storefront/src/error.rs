//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function  Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── DbError ─────────────────────────────┐                      │
//! │         ├── CoreError / FormErrors ──────────────┤                      │
//! │         └── CheckoutError ───────────────────────┴──► ApiError          │
//! │                                                        { code, message }│
//! │                                                                         │
//! │  Front end:  catch (e) { switch (e.code) { case 'EMPTY_CART': ... } }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL messages, constraint names) are logged with
//! `tracing::error!` and never returned to the caller.

use serde::Serialize;
use thiserror::Error;
use tracing::error;
use ts_rs::TS;

use signboard_core::{CoreError, FormErrors};
use signboard_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "customer_email has invalid format: missing @",
///   "fields": ["customer_email"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Form fields that failed validation, if any
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Checkout attempted with an empty cart
    EmptyCart,

    /// Storage could not be reached; safe to retry
    NetworkError,

    /// Storage refused the write (conflict, constraint, account mismatch)
    Rejected,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        let mut fields: Vec<String> = errors.iter().map(|e| e.field().to_string()).collect();
        fields.dedup();
        ApiError {
            code: ErrorCode::ValidationError,
            message: errors.to_string(),
            fields,
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Rejected,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } | DbError::ConstraintViolation { message } => {
                error!("Constraint violation: {}", message);
                ApiError::new(ErrorCode::Rejected, "The request was rejected")
            }
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                ApiError::new(ErrorCode::NetworkError, "Database unavailable")
            }
            DbError::TransactionFailed(e) => {
                error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::NetworkError, "Database transaction failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::CorruptData { column, reason } => {
                error!(column = %column, "Corrupt stored value: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Internal(e) => {
                error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Cart is empty"),
            CoreError::InvalidForm(errors) => ApiError::from(errors),
            CoreError::Validation(e) => {
                let field = e.field().to_string();
                let mut api = ApiError::validation(e.to_string());
                api.fields.push(field);
                api
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Checkout Error
// =============================================================================

/// Why an order could not be placed.
///
/// On every variant the cart is left exactly as it was.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Checkout form is invalid: {0}")]
    ValidationFailed(FormErrors),

    /// Storage unreachable: connection, pool or transaction failure.
    #[error("Could not reach the order store: {0}")]
    NetworkFailed(String),

    /// Storage answered but refused the order.
    #[error("Order rejected: {0}")]
    ServerRejected(String),
}

impl From<FormErrors> for CheckoutError {
    fn from(errors: FormErrors) -> Self {
        CheckoutError::ValidationFailed(errors)
    }
}

impl From<DbError> for CheckoutError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            error!("Order store unavailable: {}", err);
            return CheckoutError::NetworkFailed(err.to_string());
        }

        match err {
            DbError::UniqueViolation { .. } => {
                CheckoutError::ServerRejected("an account with this email already exists".to_string())
            }
            other => {
                error!("Order rejected by store: {}", other);
                CheckoutError::ServerRejected("the order could not be stored".to_string())
            }
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Cart is empty"),
            CheckoutError::ValidationFailed(errors) => ApiError::from(errors),
            CheckoutError::NetworkFailed(_) => ApiError::new(
                ErrorCode::NetworkError,
                "Could not place the order. Please try again.",
            ),
            CheckoutError::ServerRejected(reason) => ApiError::new(ErrorCode::Rejected, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signboard_core::ValidationError;

    #[test]
    fn test_form_errors_carry_field_names() {
        let mut errors = FormErrors::new();
        errors.push(ValidationError::Required {
            field: "number".to_string(),
        });
        errors.push(ValidationError::TooShort {
            field: "street".to_string(),
            min: 5,
        });

        let api = ApiError::from(CheckoutError::ValidationFailed(errors));
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.fields, vec!["number", "street"]);
    }

    #[test]
    fn test_db_errors_split_into_network_and_rejected() {
        assert!(matches!(
            CheckoutError::from(DbError::PoolExhausted),
            CheckoutError::NetworkFailed(_)
        ));
        assert!(matches!(
            CheckoutError::from(DbError::duplicate("customers.email", "a@b.co")),
            CheckoutError::ServerRejected(_)
        ));
        assert!(matches!(
            CheckoutError::from(DbError::ConstraintViolation {
                message: "CHECK".to_string()
            }),
            CheckoutError::ServerRejected(_)
        ));
    }

    #[test]
    fn test_api_error_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::EmptyCart, "Cart is empty")).unwrap();
        assert_eq!(json["code"], "EMPTY_CART");
        assert!(json.get("fields").is_none());
    }
}
