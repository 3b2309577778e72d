//! # Signboard Storefront Library
//!
//! Application shell for the signage storefront: owns the shared state and
//! exposes the commands a front end calls.
//!
//! ## Module Organization
//! ```text
//! signboard_storefront/
//! ├── lib.rs          ◄─── You are here (tracing, startup)
//! ├── config.rs       ◄─── Environment configuration
//! ├── console.rs      ◄─── Line-oriented front end
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── cart.rs     ◄─── Shared cart with change notifications
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart sidebar and badge
//! │   ├── catalog.rs  ◄─── Product listing, add to cart
//! │   ├── checkout.rs ◄─── Orders and customer accounts
//! │   └── quote.rs    ◄─── Quote requests
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State
//! Each command takes only the state it needs:
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │    DbState       │ │    CartState         │ │  StorefrontConfig    │
//! │  • pool          │ │  • one cart          │ │  • database path     │
//! │  • repositories  │ │  • watch channel     │ │  • display locale    │
//! └──────────────────┘ └──────────────────────┘ └──────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use signboard_db::{Database, DbResult};
use state::{CartState, DbState};

/// The running storefront: one database, one cart.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub db: DbState,
    pub cart: CartState,
    pub config: StorefrontConfig,
}

impl Storefront {
    /// Connects to the database (running migrations) and starts with an
    /// empty cart.
    pub async fn start(config: StorefrontConfig) -> DbResult<Self> {
        info!(db_path = %config.db_path.display(), locale = config.locale.tag(), "Starting storefront");

        let db = Database::new(config.db_config()).await?;
        info!("Database connected and migrations applied");

        Ok(Storefront {
            db: DbState::new(db),
            cart: CartState::new(),
            config,
        })
    }

    /// Closes the pool.
    pub async fn shutdown(&self) {
        self.db.inner().close().await;
        info!("Storefront stopped");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=signboard=trace` - Show trace for signboard crates only
/// - Default: INFO, with debug for signboard crates
///
/// Logs go to stderr so console output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,signboard=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
