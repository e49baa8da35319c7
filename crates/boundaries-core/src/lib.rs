//! Core domain types, ports and API projections for the boundary catalog.
//!
//! A catalog holds named collections of geographic boundaries
//! ([`BoundarySet`]) and the boundary shapes within them ([`Boundary`]).
//! This crate owns the entity definitions, slug derivation, the
//! repository ports implemented by `boundaries-db`, and the projections the
//! API layer serializes into responses.
//!
//! Spatial work (simplification, centroids, reprojection) is done by the data
//! loader before records reach this crate.

#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use contracts::api::{
    BoundaryDetail, BoundaryListEntry, BoundarySetDetail, BoundarySetListEntry, BoundaryShapeDetail,
};
pub use domain::{
    Boundary, BoundaryFilter, BoundarySet, BoundarySetUpdate, BoundarySummary, Hierarchy,
    MetadataFields, MultiPolygon, NewBoundary, NewBoundarySet, Point, SummaryRow, ValidationError,
};
pub use ports::{
    BoundaryRepository, BoundarySetRepository, CoreError, PathUrlResolver, RepositoryError, Repos,
    Route, UrlResolver,
};
pub use services::{CatalogService, SetCompleteness, SetLoad};
pub use settings::{
    CatalogSettings, DEFAULT_MAX_GEO_LIST_RESULTS, SettingsError, validate_settings,
};
pub use utils::slug::slugify;
