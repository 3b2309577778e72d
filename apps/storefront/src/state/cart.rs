//! # Cart State
//!
//! The shell-owned handle to the shopping cart.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>`: commands may run concurrently,
//! but each mutation runs to completion before another can be observed.
//!
//! ## Publish / Subscribe
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                 Store Change              Published            │
//! │  ───────                 ────────────              ─────────            │
//! │  add_item()  ──────────► merge or append ────────► CartSnapshot (rev+1) │
//! │  update_quantity() ────► set or remove  ─────────► CartSnapshot (rev+1) │
//! │  remove_item() ────────► drop line      ─────────► CartSnapshot (rev+1) │
//! │  clear() ──────────────► empty          ─────────► CartSnapshot (rev+1) │
//! │                                                                         │
//! │  No-ops (unknown id, clearing an empty cart) publish nothing.           │
//! │                                                                         │
//! │  navbar badge ◄──┐                                                      │
//! │  cart sidebar ◄──┼── watch::Receiver<CartSnapshot>  (latest value only) │
//! │  checkout     ◄──┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot is sent while the lock is still held, so subscribers see
//! states in commit order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::trace;

use signboard_core::{CartSnapshot, CartStore, ProductSnapshot};

/// Shared, observable cart.
///
/// Cloning yields another handle to the same cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
    publisher: Arc<watch::Sender<CartSnapshot>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        let store = CartStore::new();
        let (publisher, _) = watch::channel(store.snapshot());
        CartState {
            cart: Arc::new(Mutex::new(store)),
            publisher: Arc::new(publisher),
        }
    }

    /// Returns a receiver whose current value is the latest committed cart.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.publisher.subscribe()
    }

    /// Takes a consistent copy of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        self.lock().snapshot()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|c| c.item_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the cart, publishing the
    /// new snapshot if the cart changed.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.lock();
        let before = cart.revision();
        let result = f(&mut cart);

        if cart.revision() != before {
            let snapshot = cart.snapshot();
            trace!(
                revision = snapshot.revision,
                item_count = snapshot.item_count,
                "Publishing cart"
            );
            self.publisher.send_replace(snapshot);
        }

        result
    }

    /// Adds one unit of `product`.
    pub fn add_item(&self, product: ProductSnapshot) -> CartSnapshot {
        self.with_cart_mut(|c| {
            c.add_item(product);
            c.snapshot()
        })
    }

    /// Adds `times` units of `product` as one published change.
    ///
    /// One `add_item` places the line (keeping first-seen fields), then a
    /// single absolute update covers the remaining units.
    pub fn add_item_times(&self, product: ProductSnapshot, times: i64) -> CartSnapshot {
        self.with_cart_mut(|c| {
            if times > 0 {
                let id = product.id.clone();
                c.add_item(product);
                if let Some(current) = c.get(&id).map(|item| item.quantity) {
                    c.update_quantity(&id, current.saturating_add(times - 1));
                }
            }
            c.snapshot()
        })
    }

    /// Removes a line. Unknown ids are ignored.
    pub fn remove_item(&self, id: &str) -> CartSnapshot {
        self.with_cart_mut(|c| {
            c.remove_item(id);
            c.snapshot()
        })
    }

    /// Sets a line's quantity; zero or less removes it.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> CartSnapshot {
        self.with_cart_mut(|c| {
            c.update_quantity(id, quantity);
            c.snapshot()
        })
    }

    /// Empties the cart.
    pub fn clear(&self) -> CartSnapshot {
        self.with_cart_mut(|c| {
            c.clear();
            c.snapshot()
        })
    }

    /// Every mutation is a single step on the store, so a panic in another
    /// holder cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signboard_core::Money;
    use std::thread;

    fn sign() -> ProductSnapshot {
        ProductSnapshot::new("a", "Acrylic Sign", Money::from_cents(10000))
    }

    #[test]
    fn test_subscriber_sees_latest_snapshot() {
        let state = CartState::new();
        let mut rx = state.subscribe();
        assert!(rx.borrow().is_empty());

        state.add_item(sign());
        state.update_quantity("a", 3);

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.item_count, 3);
        assert_eq!(seen.total.cents(), 30000);
        assert_eq!(seen, state.snapshot());
    }

    #[test]
    fn test_noops_do_not_publish() {
        let state = CartState::new();
        let mut rx = state.subscribe();

        state.remove_item("missing");
        state.update_quantity("missing", 4);
        state.clear();
        assert!(!rx.has_changed().unwrap());

        state.add_item(sign());
        rx.borrow_and_update();
        state.update_quantity("a", 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_add_item_times_publishes_once() {
        let state = CartState::new();
        let rx = state.subscribe();
        let start = rx.borrow().revision;

        let snapshot = state.add_item_times(sign(), 5);
        assert_eq!(snapshot.item_count, 5);
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.revision > start);
        assert_eq!(rx.borrow().revision, snapshot.revision);
    }

    #[test]
    fn test_add_item_times_large_quantity_keeps_first_seen_fields() {
        let state = CartState::new();
        state.add_item(sign());

        let renamed = ProductSnapshot::new("a", "Renamed", Money::from_cents(1));
        let snapshot = state.add_item_times(renamed, 1_000_000_000_000);

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].name, "Acrylic Sign");
        assert_eq!(snapshot.items[0].quantity, 1_000_000_000_001);
        assert_eq!(snapshot.item_count, 1_000_000_000_001);
        assert_eq!(
            snapshot.total,
            Money::from_cents(10000).multiply_quantity(1_000_000_000_001)
        );

        let unchanged = state.add_item_times(sign(), 0);
        assert_eq!(unchanged.revision, snapshot.revision);
    }

    #[test]
    fn test_concurrent_adds_are_serialized() {
        let state = CartState::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        state.add_item(sign());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.item_count, 200);
        assert_eq!(snapshot.total.cents(), 2_000_000);
        assert_eq!(*state.subscribe().borrow(), snapshot);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let state = CartState::new();
        state.add_item(sign());

        let poisoner = state.clone();
        let _ = thread::spawn(move || {
            poisoner.with_cart(|_| panic!("boom"));
        })
        .join();

        assert_eq!(state.snapshot().item_count, 1);
        assert_eq!(state.clear().item_count, 0);
    }
}
