//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - URL building goes through `UrlResolver`, never a global routing table

pub mod boundary_repository;
pub mod boundary_set_repository;
pub mod url_resolver;

use std::sync::Arc;
use thiserror::Error;

pub use boundary_repository::BoundaryRepository;
pub use boundary_set_repository::BoundarySetRepository;
pub use url_resolver::{PathUrlResolver, Route, UrlResolver};

use crate::domain::ValidationError;
use crate::settings::SettingsError;

/// Container for all repository trait objects.
///
/// Lets adapters wire repositories without depending on the concrete
/// storage crate.
#[derive(Clone)]
pub struct Repos {
    /// Boundary set repository.
    pub sets: Arc<dyn BoundarySetRepository>,
    /// Boundary repository.
    pub boundaries: Arc<dyn BoundaryRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        sets: Arc<dyn BoundarySetRepository>,
        boundaries: Arc<dyn BoundaryRepository>,
    ) -> Self {
        Self { sets, boundaries }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, check constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Input failed validation before reaching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A geo-filtered query matched more boundaries than the configured limit.
    #[error("Spatial query matched {matched} boundaries; the limit is {limit}")]
    TooManyResults { matched: usize, limit: u32 },
}

impl CoreError {
    /// Whether the error means "no such entity".
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound(_)))
    }
}
