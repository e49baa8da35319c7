//! End-to-end catalog behavior over a real `SQLite` database.

use std::sync::Arc;

use boundaries_core::{
    BoundaryFilter, BoundaryRepository, BoundarySetRepository, BoundarySetUpdate, CatalogService,
    CoreError, NewBoundarySet, PathUrlResolver, RepositoryError, SetLoad, ValidationError,
};
use boundaries_db::TestDb;
use boundaries_db::fixtures::{austin, community_areas, square_boundary, wards};
use chrono::NaiveDate;

async fn catalog_with_sets() -> (TestDb, CatalogService) {
    let db = TestDb::new().await.unwrap();
    let catalog = db
        .catalog(Arc::new(PathUrlResolver::new("/api")))
        .unwrap();

    let sets = db.set_repository();
    sets.insert(&community_areas()).await.unwrap();
    sets.insert(&wards()).await.unwrap();

    (db, catalog)
}

#[tokio::test]
async fn create_set_derives_slug_from_name() {
    let db = TestDb::new().await.unwrap();
    let catalog = db.catalog(Arc::new(PathUrlResolver::default())).unwrap();

    let date = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap();
    let set = catalog
        .create_set(NewBoundarySet::new(
            "Police Districts",
            "Police District",
            false,
            "City of Chicago",
            "Chicago",
            date,
            25,
        ))
        .await
        .unwrap();
    assert_eq!(set.slug, "police-districts");

    let detail = catalog.set_detail("police-districts").await.unwrap();
    assert_eq!(detail.boundaries_url, "/boundaries/police-districts/");
    assert_eq!(detail.metadata_fields, Vec::<String>::new());
}

#[tokio::test]
async fn boundary_listing_and_detail_urls() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog.add_boundary(austin()).await.unwrap();

    let entries = catalog
        .list_boundaries(&BoundaryFilter::for_set("community-areas"))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, "/api/boundaries/community-areas/austin/");
    assert_eq!(entries[0].set_url, "/api/boundary-sets/community-areas/");
    assert_eq!(entries[0].display_name, "Community Area Austin");

    let detail = catalog
        .boundary_detail("community-areas", "austin")
        .await
        .unwrap();
    assert_eq!(detail.set_url, "/api/boundary-sets/community-areas/");
    assert_eq!(detail.external_id, "25");
    assert_eq!(detail.metadata["AREA_NUMBE"], "25");

    let shape = catalog
        .boundary_shape("community-areas", "austin")
        .await
        .unwrap();
    assert!(shape.centroid.is_some());
}

#[tokio::test]
async fn listing_unknown_set_is_not_found() {
    let (_db, catalog) = catalog_with_sets().await;
    let err = catalog
        .list_boundaries(&BoundaryFilter::for_set("school-districts"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn renaming_set_resyncs_member_names() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog
        .add_boundary(square_boundary("wards", "1", "1"))
        .await
        .unwrap();
    catalog
        .add_boundary(square_boundary("wards", "2", "2"))
        .await
        .unwrap();

    let updated = catalog
        .update_set(
            "wards",
            BoundarySetUpdate {
                name: Some("Aldermanic Wards".to_string()),
                singular: Some("Aldermanic Ward".to_string()),
                kind_first: Some(true),
                ..BoundarySetUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.slug, "wards");

    let entries = catalog
        .list_boundaries(&BoundaryFilter::for_set("wards"))
        .await
        .unwrap();
    let names: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.set_name.as_str(), e.display_name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Aldermanic Wards", "Aldermanic Ward 1"),
            ("Aldermanic Wards", "Aldermanic Ward 2"),
        ]
    );
    assert_eq!(entries[0].set_url, "/api/boundary-sets/wards/");
}

#[tokio::test]
async fn updating_other_fields_leaves_members_untouched() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog
        .add_boundary(square_boundary("wards", "1", "1"))
        .await
        .unwrap();

    catalog
        .update_set(
            "wards",
            BoundarySetUpdate {
                notes: Some(Some("2015 redistricting".to_string())),
                ..BoundarySetUpdate::default()
            },
        )
        .await
        .unwrap();

    let boundary = catalog.boundary("wards", "1").await.unwrap();
    assert_eq!(boundary.set_name, "Wards");
    assert_eq!(boundary.display_name, "1 Ward");
}

#[tokio::test]
async fn deleting_set_cascades_to_boundaries() {
    let (db, catalog) = catalog_with_sets().await;
    catalog.add_boundary(austin()).await.unwrap();
    catalog
        .add_boundary(square_boundary("wards", "1", "1"))
        .await
        .unwrap();

    catalog.delete_set("community-areas").await.unwrap();

    let err = catalog.boundary("community-areas", "austin").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Repository(RepositoryError::NotFound(_))
    ));

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boundaries")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn duplicate_boundary_slug_in_set_is_rejected() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog
        .add_boundary(square_boundary("wards", "1", "North Side"))
        .await
        .unwrap();

    let err = catalog
        .add_boundary(square_boundary("wards", "99", "North Side"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Repository(RepositoryError::AlreadyExists(_))
    ));

    catalog
        .add_boundary(square_boundary("wards", "99", "North Side").with_slug("north-side-2"))
        .await
        .unwrap();
}

#[tokio::test]
async fn completeness_counts_loaded_boundaries() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog
        .add_boundary(square_boundary("wards", "1", "1"))
        .await
        .unwrap();

    let completeness = catalog.set_completeness("wards").await.unwrap();
    assert_eq!(completeness.expected, 50);
    assert_eq!(completeness.loaded, 1);
    assert!(!completeness.is_complete());
}

#[tokio::test]
async fn set_listing_reports_hierarchy_display() {
    let (_db, catalog) = catalog_with_sets().await;
    let entries = catalog.list_sets().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Community Areas");
    assert_eq!(entries[0].hierarchy, "Municipal");
    assert_eq!(entries[1].name, "Wards");
    assert_eq!(entries[1].hierarchy, "");
    assert_eq!(entries[1].boundaries_url, "/api/boundaries/wards/");
}

#[tokio::test]
async fn insert_with_outdated_set_copy_uses_current_names() {
    let (db, catalog) = catalog_with_sets().await;
    let outdated = db.set_repository().get("wards").await.unwrap();

    catalog
        .update_set(
            "wards",
            BoundarySetUpdate {
                name: Some("Aldermanic Wards".to_string()),
                ..BoundarySetUpdate::default()
            },
        )
        .await
        .unwrap();

    let boundary = db
        .boundary_repository()
        .insert(&outdated, &square_boundary("wards", "7", "7"))
        .await
        .unwrap();
    assert_eq!(boundary.set_name, "Aldermanic Wards");
    assert_eq!(boundary.display_name, "7 Ward");
}

#[tokio::test]
async fn failed_replace_keeps_loaded_set() {
    let db = TestDb::new().await.unwrap();
    let catalog = db.catalog(Arc::new(PathUrlResolver::default())).unwrap();
    let date = NaiveDate::from_ymd_opt(2012, 5, 17).unwrap();
    let new_set = || {
        NewBoundarySet::new("Wards", "Ward", false, "City of Chicago", "Chicago", date, 50)
    };

    let loaded = catalog
        .load_set(new_set(), vec![square_boundary("", "1", "1")], false)
        .await
        .unwrap();
    assert!(matches!(loaded, SetLoad::Loaded { boundaries: 1, .. }));

    let mut unnamed = square_boundary("", "3", "3");
    unnamed.name = String::new();
    let err = catalog
        .load_set(new_set(), vec![square_boundary("", "2", "2"), unnamed], true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::Empty { field: "name" })
    ));

    let err = catalog
        .load_set(
            new_set(),
            vec![square_boundary("", "2", "2"), square_boundary("", "3", "2")],
            true,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Repository(RepositoryError::AlreadyExists(_))
    ));

    let remaining = catalog
        .list_boundaries(&BoundaryFilter::for_set("wards"))
        .await
        .unwrap();
    let names: Vec<&str> = remaining.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["1"]);
}

#[tokio::test]
async fn renaming_onto_another_sets_name_is_rejected() {
    let (_db, catalog) = catalog_with_sets().await;
    catalog
        .add_boundary(square_boundary("wards", "1", "1"))
        .await
        .unwrap();

    let err = catalog
        .update_set(
            "wards",
            BoundarySetUpdate {
                name: Some("Community Areas".to_string()),
                ..BoundarySetUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Repository(RepositoryError::AlreadyExists(_))
    ));

    let boundary = catalog.boundary("wards", "1").await.unwrap();
    assert_eq!(boundary.set_name, "Wards");
    assert_eq!(catalog.set("wards").await.unwrap().name, "Wards");
}
