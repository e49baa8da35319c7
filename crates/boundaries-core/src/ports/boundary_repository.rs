//! Boundary repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Boundary, BoundaryFilter, BoundarySet, BoundarySummary, NewBoundary};

/// Repository for boundary persistence operations.
///
/// Bulk reads go through [`list_summaries`](Self::list_summaries), which
/// loads only the [`BoundarySummary`] columns. Geometry is read one boundary
/// at a time via [`get`](Self::get).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoundaryRepository: Send + Sync {
    /// List summary rows matching `filter`, ordered by set then name.
    async fn list_summaries(
        &self,
        filter: &BoundaryFilter,
    ) -> Result<Vec<BoundarySummary>, RepositoryError>;

    /// Get one boundary, geometry included.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn get(&self, set_slug: &str, slug: &str) -> Result<Boundary, RepositoryError>;

    /// Insert a boundary into `set`.
    ///
    /// `set_name` and `display_name` are derived from the stored set with
    /// `set.slug`, read in the same transaction as the insert, so an outdated
    /// copy of a renamed set can't write stale names.
    /// Returns `Err(RepositoryError::AlreadyExists)` if the set already has a
    /// boundary with the same slug, and `Err(RepositoryError::Constraint)` if
    /// the set doesn't exist.
    async fn insert(
        &self,
        set: &BoundarySet,
        boundary: &NewBoundary,
    ) -> Result<Boundary, RepositoryError>;

    /// Delete one boundary.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn delete(&self, set_slug: &str, slug: &str) -> Result<(), RepositoryError>;

    /// Number of boundaries stored for a set.
    async fn count_for_set(&self, set_slug: &str) -> Result<i64, RepositoryError>;
}
