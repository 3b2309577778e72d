//! # Validation Module
//!
//! Form rules for checkout and quote requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Immediate per-field feedback while typing                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: same rules, enforced before any write                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE (customer email)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule of a form runs; failures are collected into [`FormErrors`].
//! Lengths are counted in characters after trimming.
//!
//! ## Usage
//! ```rust
//! use signboard_core::types::QuoteForm;
//! use signboard_core::validation::validate_quote;
//!
//! let errors = validate_quote(&QuoteForm::default()).unwrap_err();
//! assert!(errors.for_field("email").count() > 0);
//! ```

use crate::error::{FormErrors, ValidationError};
use crate::types::{CheckoutForm, PaymentMethod, QuoteForm};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Rules
// =============================================================================

/// Requires at least `min` characters after trimming.
///
/// An empty value reports `Required` rather than `TooShort`.
///
/// ```rust
/// use signboard_core::validation::validate_min_length;
///
/// assert!(validate_min_length("city", "Austin", 2).is_ok());
/// assert!(validate_min_length("city", " A ", 2).is_err());
/// ```
pub fn validate_min_length(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let len = value.trim().chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(())
}

/// Requires a non-blank value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    validate_min_length(field, value, 1)
}

/// Validates an email address.
///
/// ## Rules
/// - No whitespace inside the address
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot, and neither starts nor ends with one
///
/// ```rust
/// use signboard_core::validation::validate_email;
///
/// assert!(validate_email("email", "sales@signs.example.com").is_ok());
/// assert!(validate_email("email", "sales@localhost").is_err());
/// assert!(validate_email("email", "").is_err());
/// ```
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    let email = value.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("missing @")),
    };

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be a single address"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a payment method's wire name.
pub fn validate_payment_method(field: &str, value: &str) -> ValidationResult<PaymentMethod> {
    PaymentMethod::parse(value).ok_or_else(|| ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: PaymentMethod::ALL.iter().map(|s| s.to_string()).collect(),
    })
}

// =============================================================================
// Form Validators
// =============================================================================

/// Collects the outcome of one rule into `errors`.
fn check<T>(errors: &mut FormErrors, result: ValidationResult<T>) {
    if let Err(e) = result {
        errors.push(e);
    }
}

/// Validates the checkout form.
///
/// ## Rules
/// | Field | Rule |
/// |-------|------|
/// | customer_name | ≥ 2 chars |
/// | customer_email | valid email |
/// | customer_phone | ≥ 10 chars |
/// | password | ≥ 8 chars |
/// | confirm_password | ≥ 8 chars and equal to password |
/// | street | ≥ 5 chars |
/// | number | required |
/// | neighborhood, city, state | ≥ 2 chars |
/// | zip_code | ≥ 5 chars |
/// | payment_method | credit_card, bank_transfer or pix |
///
/// Company, complement and notes are optional.
pub fn validate_checkout(form: &CheckoutForm) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    check(&mut errors, validate_min_length("customer_name", &form.customer_name, 2));
    check(&mut errors, validate_email("customer_email", &form.customer_email));
    check(&mut errors, validate_min_length("customer_phone", &form.customer_phone, 10));
    check(&mut errors, validate_min_length("password", &form.password, 8));

    match validate_min_length("confirm_password", &form.confirm_password, 8) {
        Err(e) => errors.push(e),
        Ok(()) if form.password != form.confirm_password => {
            errors.push(ValidationError::Mismatch {
                field: "confirm_password".to_string(),
                other: "password".to_string(),
            })
        }
        Ok(()) => {}
    }

    check(&mut errors, validate_min_length("street", &form.street, 5));
    check(&mut errors, validate_required("number", &form.number));
    check(&mut errors, validate_min_length("neighborhood", &form.neighborhood, 2));
    check(&mut errors, validate_min_length("city", &form.city, 2));
    check(&mut errors, validate_min_length("state", &form.state, 2));
    check(&mut errors, validate_min_length("zip_code", &form.zip_code, 5));
    check(&mut errors, validate_payment_method("payment_method", &form.payment_method));

    errors.into_result()
}

/// Validates the quote-request form.
///
/// name ≥ 2, email valid, phone ≥ 10, project_type required,
/// description ≥ 20, budget required. Company is optional.
pub fn validate_quote(form: &QuoteForm) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    check(&mut errors, validate_min_length("name", &form.name, 2));
    check(&mut errors, validate_email("email", &form.email));
    check(&mut errors, validate_min_length("phone", &form.phone, 10));
    check(&mut errors, validate_required("project_type", &form.project_type));
    check(&mut errors, validate_min_length("description", &form.description, 20));
    check(&mut errors, validate_required("budget", &form.budget));

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_checkout() -> CheckoutForm {
        CheckoutForm {
            customer_name: "Ana Lima".to_string(),
            customer_email: "ana@example.com".to_string(),
            customer_phone: "+1 555 123 4567".to_string(),
            customer_company: None,
            password: "s3cret-pass".to_string(),
            confirm_password: "s3cret-pass".to_string(),
            street: "Congress Avenue".to_string(),
            number: "1100".to_string(),
            complement: Some("Suite 4".to_string()),
            neighborhood: "Downtown".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            payment_method: "pix".to_string(),
            notes: None,
        }
    }

    fn valid_quote() -> QuoteForm {
        QuoteForm {
            name: "Carlos".to_string(),
            email: "carlos@shop.example".to_string(),
            phone: "5551234567".to_string(),
            company: Some("Carlos Bakery".to_string()),
            project_type: "storefront_sign".to_string(),
            description: "Illuminated channel letters for the facade".to_string(),
            budget: "5k-10k".to_string(),
        }
    }

    #[test]
    fn test_valid_checkout_passes() {
        assert!(validate_checkout(&valid_checkout()).is_ok());
    }

    #[test]
    fn test_checkout_reports_every_failure() {
        let form = CheckoutForm {
            customer_name: "A".to_string(),
            customer_email: "not-an-email".to_string(),
            zip_code: "123".to_string(),
            ..valid_checkout()
        };

        let errors = validate_checkout(&form).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors.for_field("customer_name").next(),
            Some(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(errors.for_field("customer_email").next().is_some());
        assert!(errors.for_field("zip_code").next().is_some());
    }

    #[test]
    fn test_password_mismatch() {
        let form = CheckoutForm {
            confirm_password: "different-pass".to_string(),
            ..valid_checkout()
        };

        let errors = validate_checkout(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.iter().next(),
            Some(ValidationError::Mismatch { field, .. }) if field == "confirm_password"
        ));
    }

    #[test]
    fn test_short_confirmation_reports_length_not_mismatch() {
        let form = CheckoutForm {
            confirm_password: "short".to_string(),
            ..valid_checkout()
        };

        let errors = validate_checkout(&form).unwrap_err();
        assert!(matches!(
            errors.iter().next(),
            Some(ValidationError::TooShort { min: 8, .. })
        ));
    }

    #[test]
    fn test_unknown_payment_method_rejected() {
        let form = CheckoutForm {
            payment_method: "cash".to_string(),
            ..valid_checkout()
        };

        let errors = validate_checkout(&form).unwrap_err();
        assert!(matches!(
            errors.for_field("payment_method").next(),
            Some(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_blank_number_is_required() {
        let form = CheckoutForm {
            number: "   ".to_string(),
            ..valid_checkout()
        };
        let errors = validate_checkout(&form).unwrap_err();
        assert_eq!(errors.to_string(), "number is required");
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("email", "a@b.co").is_ok());
        assert!(validate_email("email", "  a@b.co  ").is_ok());
        assert!(validate_email("email", "a b@c.com").is_err());
        assert!(validate_email("email", "@c.com").is_err());
        assert!(validate_email("email", "a@@c.com").is_err());
        assert!(validate_email("email", "a@c.").is_err());
        assert!(validate_email("email", "a@.com").is_err());
        assert!(validate_email("email", "plainaddress").is_err());
    }

    #[test]
    fn test_lengths_count_characters() {
        // Two characters, four bytes.
        assert!(validate_min_length("city", "Év", 2).is_ok());
        assert!(validate_min_length("city", "É", 2).is_err());
    }

    #[test]
    fn test_quote_rules() {
        assert!(validate_quote(&valid_quote()).is_ok());

        let form = QuoteForm {
            description: "Need a sign".to_string(),
            budget: String::new(),
            company: None,
            ..valid_quote()
        };
        let errors = validate_quote(&form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.for_field("description").next().is_some());
        assert!(matches!(
            errors.for_field("budget").next(),
            Some(ValidationError::Required { .. })
        ));
    }
}
