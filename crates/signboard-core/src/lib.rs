//! # signboard-core: Pure Business Logic for the Signboard Storefront
//!
//! This crate holds the storefront's business rules as pure functions and
//! plain state containers, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Signboard Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (catalog, cart, checkout)          │   │
//! │  │    Product card ──► Cart sidebar ──► Checkout ──► Navbar badge  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (commands)                   │   │
//! │  │    add_to_cart, update_cart_item, checkout, submit_quote        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ signboard-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌──────┐ │   │
//! │  │   │  types  │  │  money  │  │  cart   │  │validation│  │format│ │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────┘  └──────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 signboard-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart store: line items plus derived totals
//! - [`types`] - Domain types (Product, Order, Customer, QuoteRequest, forms)
//! - [`money`] - Money type with integer arithmetic
//! - [`validation`] - Checkout and quote form rules
//! - [`format`] - Presentation helpers (badge label, locale price formatting)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use signboard_core::cart::CartStore;
//! use signboard_core::money::Money;
//! use signboard_core::types::ProductSnapshot;
//!
//! let mut cart = CartStore::new();
//! cart.add_item(ProductSnapshot::new("a", "Sign", Money::from_cents(10000)));
//! cart.add_item(ProductSnapshot::new("a", "Sign", Money::from_cents(10000)));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().cents(), 20000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod format;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineItem, CartSnapshot, CartStore};
pub use error::{CoreError, FormErrors, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest item count the navbar badge shows verbatim.
///
/// Anything above renders as `"99+"`.
pub const BADGE_MAX_COUNT: i64 = 99;

/// Prefix of generated invoice numbers (`INV-20260131-000123`).
pub const INVOICE_PREFIX: &str = "INV";
