//! Composition utilities for building the catalog with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the catalog
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use boundaries_core::{CatalogService, CatalogSettings, CoreError, Repos, UrlResolver};

use crate::repositories::{SqliteBoundaryRepository, SqliteBoundarySetRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CatalogFactory;

impl CatalogFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `boundaries-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteBoundarySetRepository::new(pool.clone())),
            Arc::new(SqliteBoundaryRepository::new(pool)),
        )
    }

    /// Build a complete `CatalogService` from a pool.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CatalogFactory::build_repos(pool);
    /// let catalog = CatalogService::new(repos, urls, settings)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Settings` if `settings` are invalid.
    pub fn build_catalog(
        pool: SqlitePool,
        urls: Arc<dyn UrlResolver>,
        settings: CatalogSettings,
    ) -> Result<CatalogService, CoreError> {
        CatalogService::new(Self::build_repos(pool), urls, settings)
    }

    /// Create a boundary set repository from a pool.
    pub fn set_repository(pool: SqlitePool) -> Arc<SqliteBoundarySetRepository> {
        Arc::new(SqliteBoundarySetRepository::new(pool))
    }

    /// Create a boundary repository from a pool.
    pub fn boundary_repository(pool: SqlitePool) -> Arc<SqliteBoundaryRepository> {
        Arc::new(SqliteBoundaryRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a boundary set repository using this test database.
    pub fn set_repository(&self) -> SqliteBoundarySetRepository {
        SqliteBoundarySetRepository::new(self.pool.clone())
    }

    /// Create a boundary repository using this test database.
    pub fn boundary_repository(&self) -> SqliteBoundaryRepository {
        SqliteBoundaryRepository::new(self.pool.clone())
    }

    /// Build a catalog over this test database with default settings.
    pub fn catalog(&self, urls: Arc<dyn UrlResolver>) -> Result<CatalogService, CoreError> {
        CatalogFactory::build_catalog(self.pool.clone(), urls, CatalogSettings::default())
    }
}
