//! # Cart Commands
//!
//! Commands behind the cart sidebar, the product pages and the navbar badge.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart / add_product_to_cart  ┌──────────┐   checkout   ┌──────────┐
//! │  Empty   │────────────────────────────────────►│ In Cart  │─────────────►│  Order   │
//! │  Cart    │◄────────────────────────────────────│          │              │ (pending)│
//! └──────────┘   clear_cart / last line removed    └──────────┘              └──────────┘
//!                                                   update_cart_item             │
//!                                                   remove_from_cart             ▼
//!                                                                          cart cleared
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::state::CartState;
use signboard_core::format::badge_label;
use signboard_core::{CartLineItem, CartSnapshot, Money, ProductSnapshot};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub total: Money,
    pub item_count: i64,
    /// Navbar badge text; absent when the cart is empty.
    pub badge: Option<String>,
    pub revision: u64,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            badge: badge_label(snapshot.item_count),
            items: snapshot.items,
            total: snapshot.total,
            item_count: snapshot.item_count,
            revision: snapshot.revision,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(cart.snapshot())
}

/// Adds one unit of a product the view already holds.
///
/// Adding an id already in the cart bumps its quantity; the name and price
/// first stored for that id are kept.
pub fn add_to_cart(cart: &CartState, product: ProductSnapshot) -> CartResponse {
    debug!(product_id = %product.id, "add_to_cart command");
    CartResponse::from(cart.add_item(product))
}

/// Sets the quantity of a cart line. Zero or less removes it.
pub fn update_cart_item(cart: &CartState, product_id: &str, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");
    CartResponse::from(cart.update_quantity(product_id, quantity))
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    CartResponse::from(cart.remove_item(product_id))
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    CartResponse::from(cart.clear())
}

/// Badge text for the navbar cart icon.
pub fn cart_badge(cart: &CartState) -> Option<String> {
    cart.with_cart(|c| badge_label(c.item_count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_scenario() {
        let cart = CartState::new();

        add_to_cart(&cart, ProductSnapshot::new("a", "Acrylic Sign", Money::from_cents(10000)));
        add_to_cart(
            &cart,
            ProductSnapshot::new("b", "Vinyl Banner", Money::from_cents(2500)).with_unit("sq ft"),
        );
        let response = update_cart_item(&cart, "a", 3);
        assert_eq!(response.total.cents(), 32500);
        assert_eq!(response.item_count, 4);
        assert_eq!(response.badge.as_deref(), Some("4"));

        let response = remove_from_cart(&cart, "b");
        assert_eq!(response.total.cents(), 30000);
        assert_eq!(response.item_count, 3);

        let response = clear_cart(&cart);
        assert_eq!(response.total, Money::zero());
        assert_eq!(response.item_count, 0);
        assert_eq!(response.badge, None);
        assert_eq!(get_cart(&cart), response);
    }

    #[test]
    fn test_badge_caps_at_99_plus() {
        let cart = CartState::new();
        add_to_cart(&cart, ProductSnapshot::new("a", "Decal", Money::from_cents(100)));
        update_cart_item(&cart, "a", 99);
        assert_eq!(cart_badge(&cart).as_deref(), Some("99"));

        update_cart_item(&cart, "a", 100);
        assert_eq!(cart_badge(&cart).as_deref(), Some("99+"));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let cart = CartState::new();
        add_to_cart(&cart, ProductSnapshot::new("a", "Decal", Money::from_cents(100)));

        let response = update_cart_item(&cart, "a", 0);
        assert!(response.items.is_empty());
        assert_eq!(response.item_count, 0);
    }
}
