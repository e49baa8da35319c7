//! Boundary set repository trait definition.
//!
//! This port defines the interface for boundary set persistence.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{BoundarySet, NewBoundary};

/// Repository for boundary set persistence operations.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Slugs are resolved and validated before reaching the repository
/// - The slug is the key; `update` never changes it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoundarySetRepository: Send + Sync {
    /// List all sets ordered by name.
    async fn list(&self) -> Result<Vec<BoundarySet>, RepositoryError>;

    /// Get a set by slug.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no set has that slug.
    async fn get(&self, slug: &str) -> Result<BoundarySet, RepositoryError>;

    /// Insert a new set.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the slug or name is taken.
    async fn insert(&self, set: &BoundarySet) -> Result<BoundarySet, RepositoryError>;

    /// Update every field of an existing set except its slug.
    ///
    /// When `name`, `singular` or `kind_first` change, the `set_name` and
    /// `display_name` of the set's boundaries are rewritten in the same
    /// transaction.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the set doesn't exist.
    async fn update(&self, set: &BoundarySet) -> Result<(), RepositoryError>;

    /// Store `set` with `boundaries`, replacing any set stored under the same
    /// slug (and, through the relationship, its boundaries).
    ///
    /// Runs as one transaction: on error the previously stored set and its
    /// boundaries are left as they were. Boundary names are derived from
    /// `set`.
    async fn replace(
        &self,
        set: &BoundarySet,
        boundaries: &[NewBoundary],
    ) -> Result<BoundarySet, RepositoryError>;

    /// Delete a set and, through the relationship, all of its boundaries.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the set doesn't exist.
    async fn delete(&self, slug: &str) -> Result<(), RepositoryError>;
}
