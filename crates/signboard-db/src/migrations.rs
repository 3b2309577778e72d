//! # Database Migrations
//!
//! Embedded SQL migrations for the storefront schema.
//!
//! ## Startup Sequence
//! ```text
//! Database::new
//!      │
//!      ▼
//! _sqlx_migrations present? ── no ──► create it
//!      │
//!      ▼
//! 001_initial_schema.sql  ✓ applied / ⬜ pending
//!      │
//!      ▼
//! run pending in filename order, record checksum
//! ```
//!
//! Never edit a migration that has shipped. Add `NNN_description.sql` instead.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Migrations embedded from `migrations/sqlite` at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations. Safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(
        embedded = MIGRATOR.migrations.len(),
        "Checking for pending migrations"
    );

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // A fresh database has no bookkeeping table yet.
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
