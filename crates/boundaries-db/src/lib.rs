//! `SQLite` storage for the boundary catalog.
//!
//! Implements the repository ports of `boundaries-core` and owns the schema.
//! Adapters call [`setup_database`] and hand the pool to [`CatalogFactory`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-export factory for convenient access
pub use factory::CatalogFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{SqliteBoundaryRepository, SqliteBoundarySetRepository};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
