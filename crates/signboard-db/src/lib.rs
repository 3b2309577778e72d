//! # signboard-db: Database Layer for the Signboard Storefront
//!
//! This crate provides database access for the storefront.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Storefront command (checkout)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  signboard-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄───│ CatalogRepo    │   │  (embedded)  │   │   │
//! │  │   │  SqlitePool   │    │ OrderRepo      │   │ 001_initial  │   │   │
//! │  │   │               │    │ CustomerRepo   │   │              │   │   │
//! │  │   │               │    │ QuoteRepo      │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (SIGNBOARD_DB_PATH)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signboard_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./signboard.db")).await?;
//! let products = db.catalog().list_active(None, 50).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::customer::{CustomerRepository, NewCustomer};
pub use repository::order::OrderRepository;
pub use repository::quote::QuoteRepository;
