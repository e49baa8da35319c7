//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory and database file if missing
/// 2. Enables foreign key enforcement on every connection
/// 3. Creates all tables and indexes
///
/// # Errors
///
/// Returns an error if:
/// - The database file cannot be opened or created
/// - Schema creation fails
///
/// # Example
///
/// ```rust,no_run
/// use boundaries_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/var/lib/boundaries/boundaries.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    tracing::debug!(path = %db_path.display(), "Boundary catalog database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The pool is capped at one connection: every new in-memory connection
/// would otherwise open its own empty database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;
    use std::str::FromStr;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true))
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all operations use IF NOT EXISTS.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS boundary_sets (
            slug TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            singular TEXT NOT NULL,
            kind_first INTEGER NOT NULL,
            authority TEXT NOT NULL,
            domain TEXT NOT NULL,
            hierarchy TEXT CHECK (hierarchy IS NULL OR hierarchy IN ('F', 'P', 'M', 'O')),
            last_updated TEXT NOT NULL,
            href TEXT,
            notes TEXT,
            count INTEGER NOT NULL,
            metadata_fields TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS boundaries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            set_slug TEXT NOT NULL,
            set_name TEXT NOT NULL,
            slug TEXT NOT NULL,
            external_id TEXT NOT NULL,
            name TEXT NOT NULL,
            display_name TEXT NOT NULL,
            metadata TEXT NOT NULL DEFAULT '{}',
            shape TEXT NOT NULL,
            simple_shape TEXT NOT NULL,
            centroid TEXT,
            FOREIGN KEY (set_slug) REFERENCES boundary_sets(slug) ON DELETE CASCADE,
            UNIQUE(slug, set_slug)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Per-set listings and slug lookups
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_boundaries_set ON boundaries(set_slug)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_boundaries_slug ON boundaries(slug)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_boundaries_name ON boundaries(name)")
        .execute(pool)
        .await?;

    Ok(())
}
