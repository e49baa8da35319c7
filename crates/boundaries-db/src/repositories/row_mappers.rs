//! Row mapping helpers for `SQLite` queries.

use boundaries_core::{
    Boundary, BoundarySet, BoundarySummary, Hierarchy, MetadataFields, MultiPolygon, Point,
    RepositoryError,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared SELECT column list for boundary set queries.
pub const SET_SELECT_COLUMNS: &str = "slug, name, singular, kind_first, authority, domain, hierarchy, last_updated, href, notes, count, metadata_fields";

/// Shared SELECT column list for full boundary queries, geometry included.
pub const BOUNDARY_SELECT_COLUMNS: &str = "id, set_slug, set_name, slug, external_id, name, display_name, metadata, shape, simple_shape, centroid";

/// SELECT statement loading only the list columns of boundaries.
///
/// Built from [`BoundarySummary::COLUMNS`] so list queries never touch the
/// geometry columns.
pub fn summary_select() -> String {
    format!(
        "SELECT {} FROM boundaries",
        BoundarySummary::COLUMNS.join(", ")
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Row types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
pub struct BoundarySetRow {
    slug: String,
    name: String,
    singular: String,
    kind_first: bool,
    authority: String,
    domain: String,
    hierarchy: Option<String>,
    last_updated: NaiveDate,
    href: Option<String>,
    notes: Option<String>,
    count: i64,
    metadata_fields: String,
}

#[derive(sqlx::FromRow)]
pub struct BoundaryRow {
    id: i64,
    set_slug: String,
    set_name: String,
    slug: String,
    external_id: String,
    name: String,
    display_name: String,
    metadata: String,
    shape: String,
    simple_shape: String,
    centroid: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a set row into the domain type.
pub fn row_to_set(row: BoundarySetRow) -> Result<BoundarySet, RepositoryError> {
    let hierarchy = match row.hierarchy.as_deref() {
        None => None,
        Some(code) => Some(Hierarchy::from_code(code).ok_or_else(|| {
            RepositoryError::Storage(format!(
                "Unknown hierarchy code '{code}' on set '{}'",
                row.slug
            ))
        })?),
    };

    Ok(BoundarySet {
        slug: row.slug,
        name: row.name,
        singular: row.singular,
        kind_first: row.kind_first,
        authority: row.authority,
        domain: row.domain,
        hierarchy,
        last_updated: row.last_updated,
        href: row.href,
        notes: row.notes,
        count: row.count,
        metadata_fields: MetadataFields::decode(&row.metadata_fields),
    })
}

/// Convert a boundary row into the domain type.
pub fn row_to_boundary(row: BoundaryRow) -> Result<Boundary, RepositoryError> {
    let shape: MultiPolygon = decode_json("shape", &row.shape)?;
    let simple_shape: MultiPolygon = decode_json("simple_shape", &row.simple_shape)?;
    let centroid: Option<Point> = row
        .centroid
        .as_deref()
        .map(|json| decode_json("centroid", json))
        .transpose()?;

    Ok(Boundary {
        id: row.id,
        set_slug: row.set_slug,
        set_name: row.set_name,
        slug: row.slug,
        external_id: row.external_id,
        name: row.name,
        display_name: row.display_name,
        metadata: decode_json("metadata", &row.metadata)?,
        shape,
        simple_shape,
        centroid,
    })
}

/// Stored code for an optional hierarchy.
pub fn hierarchy_code(hierarchy: Option<Hierarchy>) -> Option<&'static str> {
    hierarchy.map(Hierarchy::code)
}

/// Serialize a JSON column value.
pub fn encode_json<T: Serialize>(column: &str, value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::Serialization(format!("{column}: {e}")))
}

fn decode_json<T: DeserializeOwned>(column: &str, json: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(json).map_err(|e| RepositoryError::Serialization(format!("{column}: {e}")))
}

/// Map `SQLx` errors to `RepositoryError`.
///
/// `subject` names the entity being written so conflicts read naturally.
pub fn map_sqlx_error(e: sqlx::Error, subject: &str) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(subject.to_string());
        }
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return RepositoryError::Constraint(format!("{subject}: {db_err}"));
        }
    }
    RepositoryError::Storage(e.to_string())
}

/// Map errors where no constraint can be involved.
pub fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_select_excludes_geometry() {
        let sql = summary_select();
        assert_eq!(
            sql,
            "SELECT slug, set_slug, name, display_name, set_name FROM boundaries"
        );
        assert!(!sql.contains("shape"));
        assert!(!sql.contains("centroid"));
    }

    #[test]
    fn test_hierarchy_code() {
        assert_eq!(hierarchy_code(Some(Hierarchy::Municipal)), Some("M"));
        assert_eq!(hierarchy_code(None), None);
    }

    #[test]
    fn test_unknown_hierarchy_is_storage_error() {
        let row = BoundarySetRow {
            slug: "wards".to_string(),
            name: "Wards".to_string(),
            singular: "Ward".to_string(),
            kind_first: false,
            authority: "City of Chicago".to_string(),
            domain: "Chicago, IL".to_string(),
            hierarchy: Some("X".to_string()),
            last_updated: NaiveDate::from_ymd_opt(2012, 1, 1).unwrap(),
            href: None,
            notes: None,
            count: 50,
            metadata_fields: String::new(),
        };
        assert!(matches!(row_to_set(row), Err(RepositoryError::Storage(_))));
    }

    #[test]
    fn test_bad_geometry_is_serialization_error() {
        let row = BoundaryRow {
            id: 1,
            set_slug: "wards".to_string(),
            set_name: "Ward".to_string(),
            slug: "1".to_string(),
            external_id: "1".to_string(),
            name: "1".to_string(),
            display_name: "1 Ward".to_string(),
            metadata: "{}".to_string(),
            shape: "not json".to_string(),
            simple_shape: "{}".to_string(),
            centroid: None,
        };
        assert!(matches!(
            row_to_boundary(row),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
