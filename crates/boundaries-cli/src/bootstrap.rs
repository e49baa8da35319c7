//! CLI bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via boundaries-db)
//! - URL resolver and catalog service (via boundaries-core)
//!
//! Command handlers receive the composed `CliContext` and delegate to the
//! catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use boundaries_core::{CatalogService, CatalogSettings, PathUrlResolver, Repos, validate_settings};
use boundaries_db::{CatalogFactory, setup_database};

use crate::error::CliError;
use crate::parser::Cli;

/// Database used when neither `--database` nor `BOUNDARIES_DATABASE` is set.
pub const DEFAULT_DATABASE_PATH: &str = "boundaries.db";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the `SQLite` catalog.
    pub database_path: PathBuf,
    /// Catalog settings.
    pub settings: CatalogSettings,
    /// Prefix for generated URLs.
    pub url_prefix: String,
}

impl CliConfig {
    /// Resolve configuration from parsed arguments.
    ///
    /// Environment variables are already folded in by clap.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut settings = CatalogSettings::with_defaults();
        if let Some(limit) = cli.max_geo_results {
            settings = settings.with_max_geo_list_results(limit);
        }
        validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;

        Ok(Self {
            database_path: cli
                .database
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            settings,
            url_prefix: cli.url_prefix.clone(),
        })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The catalog facade.
    pub catalog: CatalogService,
}

impl CliContext {
    /// Access the catalog.
    pub const fn catalog(&self) -> &CatalogService {
        &self.catalog
    }
}

/// Bootstrap the CLI application.
///
/// Opens (creating if needed) the database and composes the catalog.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let pool = setup_database(&config.database_path)
        .await
        .map_err(|e| CliError::Database(format!("{}: {e}", config.database_path.display())))?;

    tracing::debug!(
        database = %config.database_path.display(),
        max_geo_list_results = config.settings.max_geo_list_results,
        "Catalog bootstrapped"
    );

    let catalog = CatalogFactory::build_catalog(
        pool,
        Arc::new(PathUrlResolver::new(config.url_prefix)),
        config.settings,
    )
    .map_err(CliError::from)?;

    Ok(CliContext { catalog })
}

/// Bootstrap with custom repos (for testing).
pub fn bootstrap_with(
    repos: Repos,
    url_prefix: &str,
    settings: CatalogSettings,
) -> Result<CliContext, CliError> {
    let catalog = CatalogService::new(repos, Arc::new(PathUrlResolver::new(url_prefix)), settings)?;
    Ok(CliContext { catalog })
}
