//! # Error Types
//!
//! Domain-specific error types for signboard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  signboard-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - A single field rule failure                    │
//! │  └── FormErrors       - Every failure of one form submission           │
//! │                                                                         │
//! │  signboard-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  ├── CheckoutError    - Order placement outcome                        │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store itself has no error type: every cart operation is total.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found (unknown id or no longer active).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submitted form failed one or more rules.
    #[error("Invalid form: {0}")]
    InvalidForm(FormErrors),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<FormErrors> for CoreError {
    fn from(errors: FormErrors) -> Self {
        CoreError::InvalidForm(errors)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the offending field so the front end can attach the
/// message to the matching input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that must be equal differ.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },
}

impl ValidationError {
    /// Returns the name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Mismatch { field, .. } => field,
        }
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// All validation failures collected from one form submission.
///
/// Forms report every broken rule at once rather than stopping at the first,
/// so a shopper can fix all fields in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<ValidationError>);

impl FormErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        FormErrors(Vec::new())
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Returns true when no rule failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the failures for a single field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl IntoIterator for FormErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "number".to_string(),
        };
        assert_eq!(err.to_string(), "number is required");

        let err = ValidationError::TooShort {
            field: "customer_name".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "customer_name must be at least 2 characters");
    }

    #[test]
    fn test_form_errors_display_joins_messages() {
        let mut errors = FormErrors::new();
        errors.push(ValidationError::Required {
            field: "number".to_string(),
        });
        errors.push(ValidationError::Mismatch {
            field: "confirm_password".to_string(),
            other: "password".to_string(),
        });

        assert_eq!(
            errors.to_string(),
            "number is required; confirm_password does not match password"
        );
        assert_eq!(errors.for_field("confirm_password").count(), 1);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_form_errors_is_ok() {
        assert!(FormErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = FormErrors::new().into();
        assert!(matches!(core_err, CoreError::InvalidForm(_)));
    }
}
