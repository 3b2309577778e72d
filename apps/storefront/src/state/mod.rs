//! # State Module
//!
//! Application state for the storefront shell, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬───────────────────────┐                   │
//! │          ▼                  ▼                       ▼                   │
//! │  ┌──────────────┐  ┌──────────────────────┐  ┌──────────────────┐       │
//! │  │   DbState    │  │      CartState       │  │ StorefrontConfig │       │
//! │  │              │  │                      │  │                  │       │
//! │  │  Database    │  │  Arc<Mutex<          │  │  db path         │       │
//! │  │  (SQLite     │  │    CartStore>>       │  │  locale          │       │
//! │  │   pool)      │  │  + watch::Sender     │  │                  │       │
//! │  └──────────────┘  └──────────────────────┘  └──────────────────┘       │
//! │                                                                         │
//! │  • DbState: pool is internally synchronized                            │
//! │  • CartState: exclusive access per mutation, observers via watch       │
//! │  • StorefrontConfig: read-only after startup                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands declare only the state they need, e.g.
//! `add_product_to_cart(&DbState, &CartState, ..)`.

mod cart;
mod db;

pub use cart::CartState;
pub use db::DbState;
