//! Boundary domain types.
//!
//! A boundary is one geographic feature (a ward, a neighbourhood) owned by
//! exactly one boundary set. `(slug, set_slug)` identifies it.
//!
//! `set_name` and `display_name` are denormalized from the owning set when the
//! boundary is created, and rewritten whenever the set's `name`, `singular` or
//! `kind_first` change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::boundary_set::BoundarySet;
use super::geometry::{MultiPolygon, Point, require_wgs84};
use super::validation::{
    MAX_BOUNDARY_NAME_LEN, MAX_DISPLAY_NAME_LEN, MAX_EXTERNAL_ID_LEN, MAX_SET_NAME_LEN,
    MAX_SLUG_LEN, ValidationError, max_len, required_text, valid_slug,
};
use crate::contracts::api::{BoundaryDetail, BoundaryListEntry, BoundaryShapeDetail};
use crate::ports::{Route, UrlResolver};
use crate::utils::slug::slug_or_derive;

/// A persisted boundary with its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Storage row ID.
    pub id: i64,
    /// Slug of the owning set.
    pub set_slug: String,
    /// Copy of the owning set's name, kept for display without a join.
    pub set_name: String,
    pub slug: String,
    /// Identifier in the source dataset, or a generated one.
    pub external_id: String,
    /// The boundary's own name, e.g. "Austin".
    pub name: String,
    /// Name and kind composed per the set's `kind_first` rule.
    pub display_name: String,
    /// Full attribute table row from the source data.
    pub metadata: Map<String, Value>,
    pub shape: MultiPolygon,
    /// `shape` simplified at `SIMPLIFICATION_TOLERANCE`.
    pub simple_shape: MultiPolygon,
    pub centroid: Option<Point>,
}

impl Boundary {
    /// Single-boundary API projection. Geometry is never included.
    pub fn as_detail(&self, urls: &dyn UrlResolver) -> BoundaryDetail {
        BoundaryDetail {
            set_url: urls.reverse(&Route::SetDetail {
                slug: &self.set_slug,
            }),
            set_name: self.set_name.clone(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            metadata: self.metadata.clone(),
            external_id: self.external_id.clone(),
        }
    }

    /// Geometry projection for the shape endpoint.
    pub fn shape_detail(&self) -> BoundaryShapeDetail {
        BoundaryShapeDetail {
            shape: self.shape.clone(),
            simple_shape: self.simple_shape.clone(),
            centroid: self.centroid,
        }
    }

    /// Listing API projection built from summary rows.
    ///
    /// Both URLs come from the row itself; `set_url` is derived from the row's
    /// set slug rather than a lookup of the set.
    pub fn list_entries<'a, I>(rows: I, urls: &dyn UrlResolver) -> Vec<BoundaryListEntry>
    where
        I: IntoIterator<Item = &'a BoundarySummary>,
    {
        rows.into_iter()
            .map(|b| BoundaryListEntry {
                url: urls.reverse(&Route::BoundaryDetail {
                    set_slug: &b.set_slug,
                    slug: &b.slug,
                }),
                name: b.name.clone(),
                display_name: b.display_name.clone(),
                set_url: urls.reverse(&Route::SetDetail { slug: &b.set_slug }),
                set_name: b.set_name.clone(),
            })
            .collect()
    }

    /// Narrow a full boundary to its summary projection.
    pub fn summary(&self) -> BoundarySummary {
        BoundarySummary {
            slug: self.slug.clone(),
            set_slug: self.set_slug.clone(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            set_name: self.set_name.clone(),
        }
    }
}

/// The narrow projection used for bulk listings.
///
/// Loading only these columns keeps geometry out of list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundarySummary {
    pub slug: String,
    pub set_slug: String,
    pub name: String,
    pub display_name: String,
    pub set_name: String,
}

impl BoundarySummary {
    /// Storage columns of the projection, in tuple order.
    pub const COLUMNS: [&'static str; 5] = ["slug", "set_slug", "name", "display_name", "set_name"];
}

/// Row tuple in `COLUMNS` order.
pub type SummaryRow = (String, String, String, String, String);

impl From<SummaryRow> for BoundarySummary {
    fn from((slug, set_slug, name, display_name, set_name): SummaryRow) -> Self {
        Self {
            slug,
            set_slug,
            name,
            display_name,
            set_name,
        }
    }
}

/// A boundary that hasn't been persisted yet.
///
/// `simple_shape` and `centroid` are computed by the loader from `shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoundary {
    /// Left empty in load files; the loader fills it in.
    #[serde(default)]
    pub set_slug: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub shape: MultiPolygon,
    pub simple_shape: MultiPolygon,
    #[serde(default)]
    pub centroid: Option<Point>,
}

/// Names resolved for a new boundary against its owning set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryNames {
    pub slug: String,
    pub set_name: String,
    pub display_name: String,
}

impl NewBoundary {
    pub fn new(
        set_slug: impl Into<String>,
        external_id: impl Into<String>,
        name: impl Into<String>,
        shape: MultiPolygon,
        simple_shape: MultiPolygon,
    ) -> Self {
        Self {
            set_slug: set_slug.into(),
            slug: None,
            external_id: external_id.into(),
            name: name.into(),
            metadata: Map::new(),
            shape,
            simple_shape,
            centroid: None,
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_centroid(mut self, centroid: Point) -> Self {
        self.centroid = Some(centroid);
        self
    }

    /// The slug this boundary will be saved under.
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }

    /// Validate fields and geometry.
    ///
    /// Both shapes must be well formed and in the catalog's reference system,
    /// and the simplified shape can't carry more vertices than the full one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("set_slug", &self.set_slug, MAX_SLUG_LEN)?;
        required_text("external_id", &self.external_id, MAX_EXTERNAL_ID_LEN)?;
        required_text("name", &self.name, MAX_BOUNDARY_NAME_LEN)?;

        let slug = self.resolved_slug();
        if slug.is_empty() {
            return Err(ValidationError::EmptySlug(self.name.clone()));
        }
        valid_slug(&slug)?;

        self.shape.validate("shape")?;
        self.simple_shape.validate("simple_shape")?;
        require_wgs84("shape", self.shape.srid)?;
        require_wgs84("simple_shape", self.simple_shape.srid)?;

        let (full, simple) = (self.shape.vertex_count(), self.simple_shape.vertex_count());
        if simple > full {
            return Err(ValidationError::SimplifiedShapeMoreDetailed {
                shape: full,
                simple,
            });
        }

        if let Some(centroid) = &self.centroid {
            centroid.validate("centroid")?;
            require_wgs84("centroid", centroid.srid)?;
        }

        Ok(())
    }

    /// Validate against the owning set and derive the denormalized names.
    pub fn resolve_names(&self, set: &BoundarySet) -> Result<BoundaryNames, ValidationError> {
        if set.slug != self.set_slug {
            return Err(ValidationError::SetMismatch {
                expected: self.set_slug.clone(),
                found: set.slug.clone(),
            });
        }
        self.validate()?;

        let display_name = set.display_name_for(&self.name);
        max_len("display_name", &display_name, MAX_DISPLAY_NAME_LEN)?;
        max_len("set_name", &set.name, MAX_SET_NAME_LEN)?;

        Ok(BoundaryNames {
            slug: self.resolved_slug(),
            set_name: set.name.clone(),
            display_name,
        })
    }
}

/// Criteria for bulk boundary listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryFilter {
    /// Only boundaries of this set.
    pub set_slug: Option<String>,
    /// Exact boundary name.
    pub name: Option<String>,
    /// Exact source identifier.
    pub external_id: Option<String>,
    /// Maximum number of rows.
    pub limit: Option<u32>,
}

impl BoundaryFilter {
    pub fn for_set(set_slug: impl Into<String>) -> Self {
        Self {
            set_slug: Some(set_slug.into()),
            ..Self::default()
        }
    }
}
