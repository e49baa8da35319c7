//! Response shapes for the boundary API.
//!
//! Field names here are the JSON keys clients see; renaming a field is a
//! breaking API change.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{MultiPolygon, Point};

/// Detail view of one boundary set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundarySetDetail {
    pub boundaries_url: String,
    pub name: String,
    pub singular: String,
    pub authority: String,
    pub domain: String,
    pub href: Option<String>,
    pub notes: Option<String>,
    pub count: i64,
    pub metadata_fields: Vec<String>,
}

/// One entry of the boundary set listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundarySetListEntry {
    pub url: String,
    pub boundaries_url: String,
    pub boundaries_count: i64,
    pub name: String,
    pub domain: String,
    /// Display label, e.g. "Municipal".
    pub hierarchy: String,
}

/// Detail view of one boundary, without geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryDetail {
    pub set_url: String,
    pub set_name: String,
    pub name: String,
    pub display_name: String,
    pub metadata: Map<String, Value>,
    pub external_id: String,
}

/// One entry of a boundary listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryListEntry {
    pub url: String,
    pub name: String,
    pub display_name: String,
    pub set_url: String,
    pub set_name: String,
}

/// Geometry of one boundary, served apart from its detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryShapeDetail {
    pub shape: MultiPolygon,
    pub simple_shape: MultiPolygon,
    pub centroid: Option<Point>,
}
