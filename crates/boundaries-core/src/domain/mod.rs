//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, routing, etc.).
//!
//! # Structure
//!
//! - `boundary_set` - Boundary set catalog entries (`BoundarySet`, `NewBoundarySet`)
//! - `boundary` - Individual boundaries and their list projection
//! - `fields` - Stored field encodings (`Hierarchy`, `MetadataFields`)
//! - `geometry` - Multi-polygon and point values
//! - `validation` - Field validation errors and length limits

mod boundary;
mod boundary_set;
mod fields;
pub mod geometry;
pub mod validation;

pub use boundary::{
    Boundary, BoundaryFilter, BoundaryNames, BoundarySummary, NewBoundary, SummaryRow,
};
pub use boundary_set::{BoundarySet, BoundarySetUpdate, NewBoundarySet};
pub use fields::{Hierarchy, MetadataFields};
pub use geometry::{MultiPolygon, Point};
pub use validation::ValidationError;

#[cfg(test)]
pub(crate) mod fixtures {
    pub use super::boundary::fixtures::*;
    pub use super::boundary_set::fixtures::*;
}
