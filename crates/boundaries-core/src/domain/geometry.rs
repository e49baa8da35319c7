//! Geometry values carried by boundaries.
//!
//! Shapes arrive already projected and simplified by the data loader; this
//! module only describes them and checks the structural invariants the
//! catalog relies on. Serialized form is GeoJSON plus an `srid` member.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// EPSG code of the geographic reference system all shapes are stored in.
pub const WGS84_SRID: i32 = 4326;

/// Tolerance (in degrees) the loader simplifies `simple_shape` with.
pub const SIMPLIFICATION_TOLERANCE: f64 = 0.0001;

/// `[x, y]` (longitude, latitude).
pub type Position = [f64; 2];

/// A closed linear ring: first and last positions are equal.
pub type Ring = Vec<Position>;

/// Exterior ring followed by any interior rings.
pub type Polygon = Vec<Ring>;

/// A multi-polygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "MultiPolygon")]
pub struct MultiPolygon {
    pub srid: i32,
    pub coordinates: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(srid: i32, coordinates: Vec<Polygon>) -> Self {
        Self { srid, coordinates }
    }

    /// A multi-polygon in the catalog's reference system.
    pub fn wgs84(coordinates: Vec<Polygon>) -> Self {
        Self::new(WGS84_SRID, coordinates)
    }

    /// Total number of positions across every ring.
    pub fn vertex_count(&self) -> usize {
        self.coordinates.iter().flatten().map(Vec::len).sum()
    }

    /// Check structure: at least one polygon, every polygon has an exterior
    /// ring, every ring is closed with at least four finite positions.
    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::Geometry { field, reason };

        if self.coordinates.is_empty() {
            return Err(invalid("multi-polygon has no polygons".to_string()));
        }

        for (p, polygon) in self.coordinates.iter().enumerate() {
            if polygon.is_empty() {
                return Err(invalid(format!("polygon {p} has no rings")));
            }
            for (r, ring) in polygon.iter().enumerate() {
                if ring.len() < 4 {
                    return Err(invalid(format!(
                        "ring {r} of polygon {p} has {} positions, need at least 4",
                        ring.len()
                    )));
                }
                if ring.first() != ring.last() {
                    return Err(invalid(format!("ring {r} of polygon {p} is not closed")));
                }
                if ring.iter().flatten().any(|c| !c.is_finite()) {
                    return Err(invalid(format!(
                        "ring {r} of polygon {p} has a non-finite coordinate"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// A point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    pub srid: i32,
    pub coordinates: Position,
}

impl Point {
    pub fn wgs84(x: f64, y: f64) -> Self {
        Self {
            srid: WGS84_SRID,
            coordinates: [x, y],
        }
    }

    pub const fn x(&self) -> f64 {
        self.coordinates[0]
    }

    pub const fn y(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.coordinates.iter().any(|c| !c.is_finite()) {
            return Err(ValidationError::Geometry {
                field,
                reason: "point has a non-finite coordinate".to_string(),
            });
        }
        Ok(())
    }
}

/// Require `srid` to be the catalog's reference system.
pub fn require_wgs84(field: &'static str, srid: i32) -> Result<(), ValidationError> {
    if srid != WGS84_SRID {
        return Err(ValidationError::SridMismatch {
            field,
            expected: WGS84_SRID,
            found: srid,
        });
    }
    Ok(())
}
