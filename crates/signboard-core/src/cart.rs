//! # Cart Store
//!
//! The authoritative in-memory record of what the shopper intends to buy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Front-end Action         Store Method            Effect                │
//! │  ───────────────          ────────────            ──────                │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_item() ──────────► qty += 1 or push     │
//! │                                                                         │
//! │  − / + buttons ──────────► update_quantity() ───► qty = n (n ≤ 0: rm)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ───────► retain(id != x)      │
//! │                                                                         │
//! │  Clear / checkout done ──► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Sidebar, navbar ────────► total(), item_count(), snapshot()  (read)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `id`; adding a known id bumps its quantity.
//! - Every line has `quantity >= 1`; reaching 0 removes the line.
//! - `total` and `item_count` are derived from `items` on every read, so
//!   they cannot drift.
//!
//! No operation can fail. The store does no I/O and knows nothing about
//! observers; the application shell wraps it and publishes snapshots.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductSnapshot;

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product in the cart.
///
/// `name`, `price`, `image_url` and `unit` are frozen from the first
/// [`ProductSnapshot`] seen for this id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub unit: Option<String>,
    pub quantity: i64,
}

impl CartLineItem {
    fn from_snapshot(product: ProductSnapshot) -> Self {
        CartLineItem {
            id: product.id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            unit: product.unit,
            quantity: 1,
        }
    }

    /// `price × quantity`.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// An owned, consistent copy of the cart at one instant.
///
/// This is what observers receive and what checkout reads, so a reader never
/// sees items from one state next to totals from another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total: Money,
    /// Units across all lines, not the number of lines.
    pub item_count: i64,
    /// Increments on every committed change.
    pub revision: u64,
}

impl CartSnapshot {
    /// Checks if the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Store
// =============================================================================

/// The shopping cart state container.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    revision: u64,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Adds one unit of `product`.
    ///
    /// A known id gets `quantity += 1` with its stored fields untouched;
    /// an unknown id is appended with quantity 1.
    pub fn add_item(&mut self, product: ProductSnapshot) {
        match self.position(&product.id) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(1);
            }
            None => self.items.push(CartLineItem::from_snapshot(product)),
        }
        self.revision += 1;
    }

    /// Removes the line for `id`.
    ///
    /// Returns `false` (and changes nothing) when no such line exists.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);

        let changed = self.items.len() != before;
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Sets the quantity for `id` to exactly `quantity`.
    ///
    /// - `quantity <= 0` removes the line, same as [`remove_item`](Self::remove_item).
    /// - An unknown id is a no-op.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.position(id) {
            Some(index) if self.items[index].quantity != quantity => {
                self.items[index].quantity = quantity;
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart. Idempotent: clearing an empty cart changes nothing.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.revision += 1;
        true
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// `Σ price × quantity`, saturating like [`Money`] arithmetic.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// `Σ quantity`, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of committed changes since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copies the current state with its derived totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            item_count: self.item_count(),
            revision: self.revision,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, name, Money::from_cents(cents))
    }

    fn assert_totals_consistent(cart: &CartStore) {
        let expected_total: i64 = cart
            .items()
            .iter()
            .map(|i| i.price.cents() * i.quantity)
            .sum();
        let expected_count: i64 = cart.items().iter().map(|i| i.quantity).sum();
        assert_eq!(cart.total().cents(), expected_total);
        assert_eq!(cart.item_count(), expected_count);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.revision(), 0);
    }

    #[test]
    fn test_add_same_id_merges_into_one_line() {
        let mut cart = CartStore::new();
        cart.add_item(product("p1", "Sign", 1000));
        cart.add_item(product("p1", "Sign", 1000));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
        assert_eq!(cart.total().cents(), 2000);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_first_seen_fields_win() {
        let mut cart = CartStore::new();
        cart.add_item(product("p1", "Sign", 1000).with_unit("sq ft"));
        cart.add_item(product("p1", "Renamed Sign", 9999));

        let line = cart.get("p1").unwrap();
        assert_eq!(line.name, "Sign");
        assert_eq!(line.price.cents(), 1000);
        assert_eq!(line.unit.as_deref(), Some("sq ft"));
        assert_eq!(cart.total().cents(), 2000);
    }

    #[test]
    fn test_zero_quantity_removes_like_remove_item() {
        let mut via_update = CartStore::new();
        via_update.add_item(product("p1", "Sign", 1000));
        let mut via_remove = via_update.clone();

        assert!(via_update.update_quantity("p1", 0));
        assert!(via_remove.remove_item("p1"));

        assert!(via_update.is_empty());
        assert_eq!(via_update.items(), via_remove.items());
        assert_eq!(via_update.total(), via_remove.total());
    }

    #[test]
    fn test_negative_quantity_removes() {
        let mut cart = CartStore::new();
        cart.add_item(product("p1", "Sign", 1000));
        assert!(cart.update_quantity("p1", -4));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut cart = CartStore::new();
        assert!(!cart.remove_item("missing"));
        assert!(!cart.update_quantity("missing", 5));

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.revision(), 0);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = CartStore::new();
        cart.add_item(product("p1", "Sign", 1000));
        cart.add_item(product("p1", "Sign", 1000));

        assert!(cart.update_quantity("p1", 5));
        assert_eq!(cart.get("p1").unwrap().quantity, 5);

        // Same value again: nothing to commit.
        let revision = cart.revision();
        assert!(!cart.update_quantity("p1", 5));
        assert_eq!(cart.revision(), revision);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", "Sign", 100));
        cart.add_item(product("b", "Banner", 25));

        assert!(cart.clear());
        let once = cart.snapshot();
        assert!(!cart.clear());
        let twice = cart.snapshot();

        assert_eq!(once, twice);
        assert!(twice.is_empty());
        assert_eq!(twice.total, Money::zero());
        assert_eq!(twice.item_count, 0);
    }

    #[test]
    fn test_signage_order_scenario() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", "Sign", 100));
        cart.add_item(product("b", "Banner", 25).with_unit("sq ft"));
        cart.update_quantity("a", 3);

        let items: Vec<(&str, i64, i64)> = cart
            .items()
            .iter()
            .map(|i| (i.id.as_str(), i.quantity, i.price.cents()))
            .collect();
        assert_eq!(items, vec![("a", 3, 100), ("b", 1, 25)]);
        assert_eq!(cart.total().cents(), 325);
        assert_eq!(cart.item_count(), 4);

        cart.remove_item("b");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("a").unwrap().quantity, 3);
        assert_eq!(cart.total().cents(), 300);
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total().cents(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = CartStore::new();
        for id in ["c", "a", "b"] {
            cart.add_item(product(id, id, 10));
        }
        cart.add_item(product("a", "a", 10));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    /// Drives a long deterministic mix of operations and checks the derived
    /// totals after every step.
    #[test]
    fn test_totals_hold_across_operation_sequences() {
        let ids = ["a", "b", "c", "d", "e"];
        let prices = [100, 2500, 29900, 1, 999];
        let mut cart = CartStore::new();

        // Linear congruential generator: reproducible without extra crates.
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for _ in 0..2_000 {
            let slot = next() % ids.len();
            match next() % 6 {
                0 | 1 => cart.add_item(product(ids[slot], ids[slot], prices[slot])),
                2 => {
                    cart.remove_item(ids[slot]);
                }
                3 => {
                    let qty = (next() % 9) as i64 - 2;
                    cart.update_quantity(ids[slot], qty);
                }
                4 => {
                    let snapshot = cart.snapshot();
                    assert_eq!(snapshot.total, cart.total());
                    assert_eq!(snapshot.item_count, cart.item_count());
                }
                _ => {
                    if next() % 10 == 0 {
                        cart.clear();
                    }
                }
            }
            assert_totals_consistent(&cart);
        }
    }

    #[test]
    fn test_huge_quantities_saturate_totals() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", "Sign", 29900));
        assert!(cart.update_quantity("a", i64::MAX / 100));

        assert_eq!(cart.total(), Money::from_cents(i64::MAX));
        assert_eq!(cart.item_count(), i64::MAX / 100);

        cart.add_item(product("b", "Decal", 50));
        cart.update_quantity("b", i64::MAX);
        cart.add_item(product("b", "Decal", 50));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total, Money::from_cents(i64::MAX));
        assert_eq!(snapshot.item_count, i64::MAX);
        assert_eq!(cart.get("b").map(|i| i.quantity), Some(i64::MAX));

        cart.update_quantity("a", 2);
        cart.remove_item("b");
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_revision_counts_only_real_changes() {
        let mut cart = CartStore::new();
        cart.add_item(product("a", "Sign", 100));
        cart.add_item(product("a", "Sign", 100));
        cart.remove_item("zzz");
        cart.update_quantity("a", 2);
        cart.update_quantity("a", 7);
        cart.clear();
        cart.clear();

        assert_eq!(cart.revision(), 4);
    }
}
