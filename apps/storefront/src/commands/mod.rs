//! # Commands Module
//!
//! Everything the front end (or the console) can ask the storefront to do.
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── get_cart, add_to_cart, update/remove/clear, cart_badge
//! ├── catalog.rs   ◄─── list_products, get_product, add_product_to_cart
//! ├── checkout.rs  ◄─── checkout, get_order, list_orders
//! └── quote.rs     ◄─── submit_quote, list_quotes
//! ```
//!
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs both
//! async fn add_product_to_cart(db: &DbState, cart: &CartState, ..)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod quote;
