//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  order_id (FK)  │       │
//! │  │  name, unit     │   │  invoice_number │   │  name (frozen)  │       │
//! │  │  price          │   │  status, total  │   │  price × qty    │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ snapshot()                                                  │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ProductSnapshot  │   │    Customer     │   │  QuoteRequest   │       │
//! │  │ → cart add_item │   │  email (unique) │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartSnapshot;
use crate::money::Money;

// =============================================================================
// Product Snapshot
// =============================================================================

/// The product data the cart copies at add time.
///
/// The cart never re-reads the catalog: whatever this snapshot carries is
/// what the line item shows until it is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image_url: Option<String>,
    /// Display suffix such as "sq ft". Never used in price math.
    pub unit: Option<String>,
}

impl ProductSnapshot {
    /// Creates a snapshot without image or unit.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        ProductSnapshot {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
            unit: None,
        }
    }

    /// Sets the display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product (sign, banner, vinyl, ...).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Money,
    pub image_url: Option<String>,
    pub unit: Option<String>,
    /// Smallest quantity the product page lets a shopper pick.
    pub min_quantity: Option<i64>,
    /// Largest quantity the product page lets a shopper pick.
    pub max_quantity: Option<i64>,
    pub lead_time_days: Option<i64>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Freezes the fields the cart needs.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            unit: self.unit.clone(),
        }
    }

    /// Clamps a requested quantity into this product's allowed range.
    pub fn clamp_quantity(&self, requested: i64) -> i64 {
        clamp_quantity(requested, self.min_quantity, self.max_quantity)
    }
}

/// Clamps a quantity into `[min or 1, max or unbounded]`.
///
/// The cart store enforces no bounds; product pages call this before adding.
/// A `max` below the effective minimum wins, so a misconfigured product
/// never yields more than its maximum.
///
/// ```rust
/// use signboard_core::types::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0, None, None), 1);
/// assert_eq!(clamp_quantity(50, Some(2), Some(10)), 10);
/// assert_eq!(clamp_quantity(1, Some(2), Some(10)), 2);
/// ```
pub fn clamp_quantity(requested: i64, min: Option<i64>, max: Option<i64>) -> i64 {
    let floor = min.unwrap_or(1).max(1);
    let qty = requested.max(floor);
    match max {
        Some(max) if max >= 1 => qty.min(max),
        _ => qty,
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper intends to pay.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    /// Instant transfer; preselected on the checkout form.
    #[default]
    Pix,
}

impl PaymentMethod {
    /// All accepted methods, in wire form.
    pub const ALL: [&'static str; 3] = ["credit_card", "bank_transfer", "pix"];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Pix => "pix",
        }
    }

    /// Parses the wire name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "credit_card" => Some(PaymentMethod::CreditCard),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "pix" => Some(PaymentMethod::Pix),
            _ => None,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle state of an order.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    /// Just placed; awaiting payment confirmation.
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

// =============================================================================
// Shipping Address
// =============================================================================

/// Where the order ships. Stored as one JSON column on the order row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Everything the shopper types on the checkout page.
///
/// Validated by [`crate::validation::validate_checkout`] before any write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_company: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Wire name of a [`PaymentMethod`]; checked during validation.
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_payment_method() -> String {
    PaymentMethod::default().as_str().to_string()
}

impl CheckoutForm {
    /// Builds the shipping address from the form's address fields.
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            street: self.street.trim().to_string(),
            number: self.number.trim().to_string(),
            complement: self
                .complement
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// An order line, frozen from a cart line at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
    /// `price × quantity`.
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub invoice_number: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub notes: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of the stored line totals.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|i| i.total).sum()
    }
}

/// One line of an order about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: Money,
}

impl NewOrderLine {
    /// `price × quantity`.
    pub fn total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// An order payload built from one cart snapshot and a validated form.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub notes: String,
    pub lines: Vec<NewOrderLine>,
    pub total: Money,
}

impl NewOrder {
    /// Builds the payload.
    ///
    /// `total` is copied from the snapshot, which already equals the sum of
    /// the lines. An unrecognized payment method falls back to the default;
    /// validation rejects it before this point.
    pub fn from_checkout(
        form: &CheckoutForm,
        cart: &CartSnapshot,
        customer_id: Option<String>,
    ) -> Self {
        NewOrder {
            customer_id,
            customer_name: form.customer_name.trim().to_string(),
            customer_email: normalize_email(&form.customer_email),
            customer_phone: form.customer_phone.trim().to_string(),
            payment_method: PaymentMethod::parse(&form.payment_method).unwrap_or_default(),
            shipping_address: form.shipping_address(),
            notes: form
                .notes
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            lines: cart
                .items
                .iter()
                .map(|item| NewOrderLine {
                    product_id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: cart.total,
        }
    }
}

// =============================================================================
// Customers
// =============================================================================

/// A shopper account, created at first checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Never sent to the front end.
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Lowercases and trims an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Quote Requests
// =============================================================================

/// Processing state of a quote request.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuoteStatus {
    #[default]
    Pending,
    Reviewed,
    Quoted,
    Closed,
}

/// What the shopper types on the quote-request page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    pub project_type: String,
    pub description: String,
    pub budget: String,
}

/// A stored quote request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub project_type: String,
    pub description: String,
    pub budget: String,
    pub status: QuoteStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-3, None, None), 1);
        assert_eq!(clamp_quantity(7, None, None), 7);
        assert_eq!(clamp_quantity(1, Some(5), None), 5);
        assert_eq!(clamp_quantity(20, Some(5), Some(12)), 12);
        // max below min: max wins
        assert_eq!(clamp_quantity(1, Some(10), Some(4)), 4);
        // nonsensical bounds are ignored
        assert_eq!(clamp_quantity(3, Some(0), Some(0)), 3);
    }

    #[test]
    fn test_payment_method_round_trip_names() {
        for name in PaymentMethod::ALL {
            let method = PaymentMethod::parse(name).unwrap();
            assert_eq!(method.as_str(), name);
        }
        assert_eq!(PaymentMethod::parse("cash"), None);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Pix);
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(QuoteStatus::default(), QuoteStatus::Pending);
    }

    #[test]
    fn test_checkout_form_defaults_payment_method_when_missing() {
        let json = r#"{
            "customerName": "Ana Lima",
            "customerEmail": "ana@example.com",
            "customerPhone": "5551234567",
            "password": "secret123",
            "confirmPassword": "secret123",
            "street": "Main Street",
            "number": "42",
            "neighborhood": "Centro",
            "city": "Austin",
            "state": "TX",
            "zipCode": "73301"
        }"#;
        let form: CheckoutForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.payment_method, "pix");
        assert_eq!(form.shipping_address().complement, "");
    }

    #[test]
    fn test_new_order_from_checkout_copies_snapshot() {
        let mut cart = CartStore::new();
        cart.add_item(ProductSnapshot::new("a", "Sign", Money::from_cents(10000)));
        cart.add_item(ProductSnapshot::new("b", "Banner", Money::from_cents(2500)));
        cart.update_quantity("a", 3);

        let form = CheckoutForm {
            customer_name: "  Ana Lima ".to_string(),
            customer_email: " Ana@Example.COM ".to_string(),
            payment_method: "bank_transfer".to_string(),
            ..CheckoutForm::default()
        };

        let order = NewOrder::from_checkout(&form, &cart.snapshot(), None);

        assert_eq!(order.customer_name, "Ana Lima");
        assert_eq!(order.customer_email, "ana@example.com");
        assert_eq!(order.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].total().cents(), 30000);
        assert_eq!(order.total.cents(), 32500);
        let line_sum: Money = order.lines.iter().map(NewOrderLine::total).sum();
        assert_eq!(line_sum, order.total);
    }

    #[test]
    fn test_product_snapshot_freezes_catalog_fields() {
        let now = Utc::now();
        let product = Product {
            id: "p1".to_string(),
            name: "Vinyl Banner".to_string(),
            description: None,
            category: Some("banners".to_string()),
            price: Money::from_cents(1250),
            image_url: Some("/img/banner.png".to_string()),
            unit: Some("sq ft".to_string()),
            min_quantity: Some(4),
            max_quantity: Some(200),
            lead_time_days: Some(3),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let snapshot = product.snapshot();
        assert_eq!(snapshot.id, "p1");
        assert_eq!(snapshot.unit.as_deref(), Some("sq ft"));
        assert_eq!(snapshot.price.cents(), 1250);
        assert_eq!(product.clamp_quantity(1), 4);
        assert_eq!(product.clamp_quantity(500), 200);
    }
}
