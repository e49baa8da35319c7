//! Catalog service - orchestrates boundary set and boundary operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::contracts::api::{
    BoundaryDetail, BoundaryListEntry, BoundarySetDetail, BoundarySetListEntry,
    BoundaryShapeDetail,
};
use crate::domain::{
    Boundary, BoundaryFilter, BoundarySet, BoundarySetUpdate, NewBoundary, NewBoundarySet,
};
use crate::ports::{CoreError, Repos, UrlResolver};
use crate::settings::{CatalogSettings, validate_settings};

/// How many of a set's expected features have been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCompleteness {
    /// The set's declared feature count.
    pub expected: i64,
    /// Boundaries actually stored.
    pub loaded: i64,
}

impl SetCompleteness {
    pub const fn is_complete(&self) -> bool {
        self.loaded == self.expected
    }
}

/// Result of [`CatalogService::load_set`].
#[derive(Debug, Clone, PartialEq)]
pub enum SetLoad {
    /// The set was already stored and replacing wasn't requested.
    Skipped(BoundarySet),
    /// The set was stored with this many boundaries.
    Loaded { set: BoundarySet, boundaries: usize },
}

/// Service over the boundary catalog.
///
/// Delegates storage to the injected repositories and builds API projections
/// with the injected `UrlResolver`. Storage errors pass through unchanged.
pub struct CatalogService {
    repos: Repos,
    urls: Arc<dyn UrlResolver>,
    settings: CatalogSettings,
}

impl CatalogService {
    /// Create a catalog service. Fails if `settings` are invalid.
    pub fn new(
        repos: Repos,
        urls: Arc<dyn UrlResolver>,
        settings: CatalogSettings,
    ) -> Result<Self, CoreError> {
        validate_settings(&settings)?;
        Ok(Self {
            repos,
            urls,
            settings,
        })
    }

    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn urls(&self) -> &dyn UrlResolver {
        self.urls.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Boundary sets
    // ─────────────────────────────────────────────────────────────────────────

    /// All sets, ordered by name.
    pub async fn sets(&self) -> Result<Vec<BoundarySet>, CoreError> {
        self.repos.sets.list().await.map_err(CoreError::from)
    }

    /// Listing projection of all sets.
    pub async fn list_sets(&self) -> Result<Vec<BoundarySetListEntry>, CoreError> {
        let sets = self.sets().await?;
        Ok(BoundarySet::list_entries(&sets, self.urls()))
    }

    /// Get a set by slug.
    pub async fn set(&self, slug: &str) -> Result<BoundarySet, CoreError> {
        self.repos.sets.get(slug).await.map_err(CoreError::from)
    }

    /// Detail projection of one set.
    pub async fn set_detail(&self, slug: &str) -> Result<BoundarySetDetail, CoreError> {
        Ok(self.set(slug).await?.as_detail(self.urls()))
    }

    /// Create a set, deriving its slug from its name if none was supplied.
    pub async fn create_set(&self, new: NewBoundarySet) -> Result<BoundarySet, CoreError> {
        let set = new.into_set()?;
        debug!(slug = %set.slug, name = %set.name, "Creating boundary set");
        self.repos.sets.insert(&set).await.map_err(CoreError::from)
    }

    /// Apply a partial update to a set. The slug never changes.
    pub async fn update_set(
        &self,
        slug: &str,
        update: BoundarySetUpdate,
    ) -> Result<BoundarySet, CoreError> {
        let current = self.set(slug).await?;
        let mut updated = current.clone();
        updated.apply(update);
        updated.validate()?;

        if current.member_names_differ(&updated) {
            info!(
                slug,
                old_name = %current.name,
                new_name = %updated.name,
                "Boundary set naming changed; member boundaries will be re-synced"
            );
        }

        self.repos.sets.update(&updated).await?;
        Ok(updated)
    }

    /// Delete a set together with its boundaries.
    pub async fn delete_set(&self, slug: &str) -> Result<(), CoreError> {
        debug!(slug, "Deleting boundary set");
        self.repos.sets.delete(slug).await.map_err(CoreError::from)
    }

    /// Load a set together with its boundaries.
    ///
    /// Every boundary takes its `set_slug` from the set and is validated
    /// against it before storage is touched. A set that is already stored is
    /// skipped unless `replace` is set; replacing swaps the set and all of
    /// its boundaries in one step, so a failed load leaves the previous data
    /// in place.
    pub async fn load_set(
        &self,
        new: NewBoundarySet,
        mut boundaries: Vec<NewBoundary>,
        replace: bool,
    ) -> Result<SetLoad, CoreError> {
        let set = new.into_set()?;
        for boundary in &mut boundaries {
            boundary.set_slug.clone_from(&set.slug);
            boundary.resolve_names(&set)?;
        }

        match self.set(&set.slug).await {
            Ok(existing) if !replace => {
                info!(slug = %set.slug, "Boundary set already loaded, skipping");
                return Ok(SetLoad::Skipped(existing));
            }
            Ok(_) => info!(slug = %set.slug, "Replacing boundary set"),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let stored = self.repos.sets.replace(&set, &boundaries).await?;
        Ok(SetLoad::Loaded {
            set: stored,
            boundaries: boundaries.len(),
        })
    }

    /// Compare a set's declared feature count with what is stored.
    pub async fn set_completeness(&self, slug: &str) -> Result<SetCompleteness, CoreError> {
        let set = self.set(slug).await?;
        let loaded = self.repos.boundaries.count_for_set(slug).await?;
        Ok(SetCompleteness {
            expected: set.count,
            loaded,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Boundaries
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a boundary to its set, denormalizing the set's naming onto it.
    pub async fn add_boundary(&self, new: NewBoundary) -> Result<Boundary, CoreError> {
        let set = self.set(&new.set_slug).await?;
        new.resolve_names(&set)?;
        debug!(set = %set.slug, name = %new.name, "Adding boundary");
        self.repos
            .boundaries
            .insert(&set, &new)
            .await
            .map_err(CoreError::from)
    }

    /// Get one boundary with its geometry.
    pub async fn boundary(&self, set_slug: &str, slug: &str) -> Result<Boundary, CoreError> {
        self.repos
            .boundaries
            .get(set_slug, slug)
            .await
            .map_err(CoreError::from)
    }

    /// Detail projection of one boundary (no geometry).
    pub async fn boundary_detail(
        &self,
        set_slug: &str,
        slug: &str,
    ) -> Result<BoundaryDetail, CoreError> {
        Ok(self.boundary(set_slug, slug).await?.as_detail(self.urls()))
    }

    /// Geometry projection of one boundary.
    pub async fn boundary_shape(
        &self,
        set_slug: &str,
        slug: &str,
    ) -> Result<BoundaryShapeDetail, CoreError> {
        Ok(self.boundary(set_slug, slug).await?.shape_detail())
    }

    /// Listing projection of boundaries matching `filter`.
    ///
    /// When the filter names a set, the set must exist; an empty listing of a
    /// missing set would be indistinguishable from an empty set.
    pub async fn list_boundaries(
        &self,
        filter: &BoundaryFilter,
    ) -> Result<Vec<BoundaryListEntry>, CoreError> {
        if let Some(set_slug) = &filter.set_slug {
            self.set(set_slug).await?;
        }
        let rows = self.repos.boundaries.list_summaries(filter).await?;
        Ok(Boundary::list_entries(&rows, self.urls()))
    }

    /// Delete one boundary.
    pub async fn delete_boundary(&self, set_slug: &str, slug: &str) -> Result<(), CoreError> {
        self.repos
            .boundaries
            .delete(set_slug, slug)
            .await
            .map_err(CoreError::from)
    }

    /// Reject a geo-filtered result that matched more boundaries than allowed.
    pub fn check_geo_result_count(&self, matched: usize) -> Result<(), CoreError> {
        let limit = self.settings.max_geo_list_results;
        if matched > limit as usize {
            warn!(matched, limit, "Geo-filtered query exceeded result limit");
            return Err(CoreError::TooManyResults { matched, limit });
        }
        Ok(())
    }
}
