//! Load command handler.
//!
//! Loads one boundary set and its boundaries from a JSON file. Geometry in
//! the file is expected in WGS 84 with `simple_shape` and `centroid` already
//! computed.

use std::path::Path;

use anyhow::Result;
use boundaries_core::{NewBoundary, NewBoundarySet, SetLoad};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::print_json;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Contents of a load file.
#[derive(Debug, Deserialize)]
pub struct LoadFile {
    pub set: NewBoundarySet,
    #[serde(default)]
    pub boundaries: Vec<NewBoundary>,
}

/// Outcome of loading one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub slug: String,
    /// The set was already loaded and `replace` wasn't requested.
    pub skipped: bool,
    pub loaded: usize,
    pub expected: i64,
}

/// Execute the load command.
pub async fn execute(ctx: &CliContext, path: &Path, replace: bool) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let file: LoadFile = serde_json::from_str(&contents)
        .map_err(|e| CliError::Arguments(format!("{}: {e}", path.display())))?;

    let report = load(ctx, file, replace).await?;
    print_json(&report)
}

/// Load a parsed file into the catalog.
///
/// An already loaded set is skipped unless `replace` is set. Replacing is
/// all-or-nothing: if any boundary in the file is rejected, the previously
/// loaded set stays as it was.
pub async fn load(ctx: &CliContext, file: LoadFile, replace: bool) -> Result<LoadReport, CliError> {
    let catalog = ctx.catalog();

    let (set, loaded) = match catalog.load_set(file.set, file.boundaries, replace).await? {
        SetLoad::Skipped(existing) => {
            return Ok(LoadReport {
                slug: existing.slug,
                skipped: true,
                loaded: 0,
                expected: existing.count,
            });
        }
        SetLoad::Loaded { set, boundaries } => (set, boundaries),
    };

    let completeness = catalog.set_completeness(&set.slug).await?;
    if !completeness.is_complete() {
        warn!(
            slug = %set.slug,
            expected = completeness.expected,
            loaded = completeness.loaded,
            "Loaded boundary count differs from the set's declared count"
        );
    }

    Ok(LoadReport {
        slug: set.slug,
        skipped: false,
        loaded,
        expected: completeness.expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use boundaries_core::CatalogSettings;
    use boundaries_db::{CatalogFactory, TestDb};

    const WARDS: &str = r#"{
        "set": {
            "name": "Wards",
            "singular": "Ward",
            "kind_first": false,
            "authority": "City of Chicago",
            "domain": "Chicago, IL",
            "hierarchy": "M",
            "last_updated": "2012-05-17",
            "count": 2,
            "metadata_fields": ["WARD", "ALDERMAN"]
        },
        "boundaries": [
            {
                "external_id": "1",
                "name": "1",
                "metadata": {"WARD": "1", "ALDERMAN": "Joe Moreno"},
                "shape": {"type": "MultiPolygon", "srid": 4326, "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]]},
                "simple_shape": {"type": "MultiPolygon", "srid": 4326, "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]]},
                "centroid": {"type": "Point", "srid": 4326, "coordinates": [0.5, 0.5]}
            }
        ]
    }"#;

    async fn context() -> (TestDb, CliContext) {
        let db = TestDb::new().await.unwrap();
        let ctx = bootstrap_with(
            CatalogFactory::build_repos(db.pool().clone()),
            "",
            CatalogSettings::default(),
        )
        .unwrap();
        (db, ctx)
    }

    fn wards_file() -> LoadFile {
        serde_json::from_str(WARDS).unwrap()
    }

    #[tokio::test]
    async fn test_load_creates_set_and_boundaries() {
        let (_db, ctx) = context().await;

        let report = load(&ctx, wards_file(), false).await.unwrap();
        assert_eq!(
            report,
            LoadReport {
                slug: "wards".to_string(),
                skipped: false,
                loaded: 1,
                expected: 2,
            }
        );

        let detail = ctx.catalog().boundary_detail("wards", "1").await.unwrap();
        assert_eq!(detail.display_name, "1 Ward");
        assert_eq!(detail.set_url, "/boundary-sets/wards/");
    }

    #[tokio::test]
    async fn test_reload_skips_unless_replace() {
        let (_db, ctx) = context().await;
        load(&ctx, wards_file(), false).await.unwrap();

        let report = load(&ctx, wards_file(), false).await.unwrap();
        assert!(report.skipped);

        let report = load(&ctx, wards_file(), true).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report.loaded, 1);
        assert_eq!(
            ctx.catalog()
                .set_completeness("wards")
                .await
                .unwrap()
                .loaded,
            1
        );
    }

    #[tokio::test]
    async fn test_invalid_boundary_is_argument_error() {
        let (_db, ctx) = context().await;
        let mut file = wards_file();
        file.boundaries[0].name = String::new();

        let err = load(&ctx, file, false).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_loaded_set() {
        let (_db, ctx) = context().await;
        load(&ctx, wards_file(), false).await.unwrap();

        let mut file = wards_file();
        file.set.count = 3;
        let mut broken = file.boundaries[0].clone();
        broken.external_id = "2".to_string();
        broken.name = String::new();
        file.boundaries.push(broken);

        let err = load(&ctx, file, true).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let set = ctx.catalog().set("wards").await.unwrap();
        assert_eq!(set.count, 2);
        let detail = ctx.catalog().boundary_detail("wards", "1").await.unwrap();
        assert_eq!(detail.display_name, "1 Ward");
    }

    #[tokio::test]
    async fn test_duplicate_slugs_in_file_load_nothing() {
        let (_db, ctx) = context().await;
        let mut file = wards_file();
        let mut twin = file.boundaries[0].clone();
        twin.external_id = "1b".to_string();
        file.boundaries.push(twin);

        let err = load(&ctx, file, false).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(ctx.catalog().set("wards").await.unwrap_err().is_not_found());
    }
}
