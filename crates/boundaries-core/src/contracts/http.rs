//! Boundary API route constants.

/// Boundary set collection. Detail routes append `/{slug}/`.
pub const BOUNDARY_SETS_PATH: &str = "/boundary-sets";

/// Boundary collection. Per-set listings append `/{set_slug}/`, details
/// append `/{set_slug}/{slug}/`.
pub const BOUNDARIES_PATH: &str = "/boundaries";

/// Suffix of the geometry endpoint under a boundary detail route.
pub const SHAPE_SUFFIX: &str = "shape";
