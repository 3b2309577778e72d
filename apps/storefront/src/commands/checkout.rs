//! # Checkout Commands
//!
//! Turns the cart into a stored order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(form)                                                         │
//! │                                                                         │
//! │  1. snapshot = cart.snapshot()        empty? ──────────► EmptyCart     │
//! │  2. validate_checkout(form)           errors? ─────────► ValidationFailed
//! │  3. customers().find_by_email                                          │
//! │       ├── unknown  → argon2 hash (blocking pool), create in the order tx│
//! │       ├── known + password verifies → reuse account                    │
//! │       └── known + wrong password ───────────────────────► ServerRejected│
//! │  4. orders().place(NewOrder::from_checkout(form, snapshot))            │
//! │       storage unreachable ─────────────────────────────► NetworkFailed │
//! │  5. COMMIT succeeded → remove the ordered lines from the cart          │
//! │                                                                         │
//! │  The cart lock is never held across an await. On any error the cart    │
//! │  is exactly as the shopper left it.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use password_hash::rand_core::OsRng;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ApiResult, CheckoutError};
use crate::state::{CartState, DbState};
use signboard_core::validation::validate_checkout;
use signboard_core::{normalize_email, CartSnapshot, CartStore, CheckoutForm, NewOrder, Order};
use signboard_db::NewCustomer;

/// Default number of orders returned by [`list_orders`].
pub const ORDER_HISTORY_LIMIT: u32 = 20;

/// Places an order from the current cart.
///
/// ## Returns
/// The stored order with its items. The cart has been emptied of the
/// ordered lines.
pub async fn place_order(
    db: &DbState,
    cart: &CartState,
    form: &CheckoutForm,
) -> Result<Order, CheckoutError> {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    validate_checkout(form)?;

    debug!(
        revision = snapshot.revision,
        lines = snapshot.items.len(),
        total_cents = snapshot.total.cents(),
        "Checkout snapshot taken"
    );

    let email = normalize_email(&form.customer_email);
    let (customer_id, new_customer) = match db.inner().customers().find_by_email(&email).await? {
        Some(existing) => {
            let verified = match existing.password_hash.clone() {
                Some(hash) => verify_password_blocking(form.password.clone(), hash).await,
                None => false,
            };
            if !verified {
                warn!(customer_id = %existing.id, "Checkout password mismatch for existing account");
                return Err(CheckoutError::ServerRejected(
                    "an account with this email already exists with a different password"
                        .to_string(),
                ));
            }
            (Some(existing.id), None)
        }
        None => {
            let hash = hash_password_blocking(form.password.clone()).await?;
            let company = form
                .customer_company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            let new = NewCustomer {
                full_name: form.customer_name.trim().to_string(),
                email: email.clone(),
                phone: Some(form.customer_phone.trim().to_string()),
                company,
                password_hash: Some(hash),
            };
            (None, Some(new))
        }
    };

    let new_order = NewOrder::from_checkout(form, &snapshot, customer_id);
    let order = db
        .inner()
        .orders()
        .place(&new_order, new_customer.as_ref())
        .await?;

    cart.with_cart_mut(|c| remove_ordered(c, &snapshot));

    info!(
        order_id = %order.id,
        invoice_number = %order.invoice_number,
        total_cents = order.total.cents(),
        "Checkout complete"
    );
    Ok(order)
}

/// Command wrapper around [`place_order`].
pub async fn checkout(db: &DbState, cart: &CartState, form: CheckoutForm) -> ApiResult<Order> {
    debug!("checkout command");
    Ok(place_order(db, cart, &form).await?)
}

/// Looks up an order by invoice number.
pub async fn get_order(db: &DbState, invoice_number: &str) -> ApiResult<Order> {
    db.inner()
        .orders()
        .get_by_invoice(invoice_number.trim())
        .await?
        .ok_or_else(|| ApiError::not_found("Order", invoice_number))
}

/// Lists a shopper's recent orders, newest first.
pub async fn list_orders(db: &DbState, email: &str) -> ApiResult<Vec<Order>> {
    Ok(db
        .inner()
        .orders()
        .list_by_email(email, ORDER_HISTORY_LIMIT)
        .await?)
}

/// Clears what was ordered.
///
/// If nothing touched the cart while the order was being stored, this is a
/// plain clear. Otherwise only the ordered units come out, so an item added
/// during checkout survives.
fn remove_ordered(cart: &mut CartStore, ordered: &CartSnapshot) {
    if cart.revision() == ordered.revision {
        cart.clear();
        return;
    }

    for line in &ordered.items {
        if let Some(current) = cart.get(&line.id).map(|item| item.quantity) {
            cart.update_quantity(&line.id, current - line.quantity);
        }
    }
}

/// Hashes a customer password for storage.
pub fn hash_password(password: &str) -> Result<String, CheckoutError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            CheckoutError::ServerRejected("the account could not be created".to_string())
        })?;

    Ok(hash.to_string())
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String, CheckoutError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            CheckoutError::ServerRejected("the account could not be created".to_string())
        })?
}

/// Runs [`verify_password`] on the blocking pool. A failed task verifies
/// nothing.
pub async fn verify_password_blocking(password: String, hash: String) -> bool {
    match task::spawn_blocking(move || verify_password(&password, &hash)).await {
        Ok(verified) => verified,
        Err(e) => {
            error!("Password verification task failed: {}", e);
            false
        }
    }
}

/// Verifies a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
