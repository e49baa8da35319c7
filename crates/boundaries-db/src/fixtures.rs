//! Sample Chicago data for tests.

use boundaries_core::{BoundarySet, Hierarchy, MultiPolygon, NewBoundary, NewBoundarySet, Point};
use chrono::NaiveDate;
use serde_json::{Map, Value};

fn last_updated() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 5, 17).unwrap_or_default()
}

/// Community areas: kind-first naming, with hierarchy and metadata fields.
pub fn community_areas() -> BoundarySet {
    NewBoundarySet::new(
        "Community Areas",
        "Community Area",
        true,
        "City of Chicago",
        "Chicago",
        last_updated(),
        77,
    )
    .with_hierarchy(Hierarchy::Municipal)
    .with_href("https://data.cityofchicago.org/")
    .with_metadata_fields(["AREA_NUMBE", "COMMUNITY"].into_iter().collect())
    .into_set()
    .unwrap_or_else(|e| panic!("community areas fixture: {e}"))
}

/// Wards: name-first naming, no hierarchy.
pub fn wards() -> BoundarySet {
    NewBoundarySet::new(
        "Wards",
        "Ward",
        false,
        "City of Chicago",
        "Chicago",
        last_updated(),
        50,
    )
    .into_set()
    .unwrap_or_else(|e| panic!("wards fixture: {e}"))
}

/// Axis-aligned square with `steps` vertices per edge.
pub fn square(x: f64, y: f64, size: f64, steps: u32) -> MultiPolygon {
    let step = size / f64::from(steps);
    let mut ring = Vec::new();
    for i in 0..steps {
        ring.push([x + step * f64::from(i), y]);
    }
    for i in 0..steps {
        ring.push([x + size, y + step * f64::from(i)]);
    }
    for i in 0..steps {
        ring.push([x + size - step * f64::from(i), y + size]);
    }
    for i in 0..steps {
        ring.push([x, y + size - step * f64::from(i)]);
    }
    ring.push([x, y]);
    MultiPolygon::wgs84(vec![vec![ring]])
}

/// A small square boundary with no metadata.
pub fn square_boundary(set_slug: &str, external_id: &str, name: &str) -> NewBoundary {
    NewBoundary::new(
        set_slug,
        external_id,
        name,
        square(-87.7, 41.8, 0.01, 2),
        square(-87.7, 41.8, 0.01, 1),
    )
}

/// The Austin community area, with metadata and centroid.
pub fn austin() -> NewBoundary {
    let mut metadata = Map::new();
    metadata.insert("AREA_NUMBE".to_string(), Value::from("25"));
    metadata.insert("COMMUNITY".to_string(), Value::from("AUSTIN"));

    NewBoundary::new(
        "community-areas",
        "25",
        "Austin",
        square(-87.8, 41.87, 0.05, 2),
        square(-87.8, 41.87, 0.05, 1),
    )
    .with_metadata(metadata)
    .with_centroid(Point::wgs84(-87.775, 41.895))
}
