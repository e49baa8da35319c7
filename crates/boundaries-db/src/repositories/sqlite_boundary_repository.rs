//! `SQLite` implementation of the `BoundaryRepository` trait.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use boundaries_core::{
    Boundary, BoundaryFilter, BoundaryRepository, BoundarySet, BoundarySummary, NewBoundary,
    RepositoryError, SummaryRow,
};

use super::row_mappers::{
    BOUNDARY_SELECT_COLUMNS, BoundaryRow, BoundarySetRow, SET_SELECT_COLUMNS, encode_json,
    map_sqlx_error, row_to_boundary, row_to_set, storage_error, summary_select,
};

/// `SQLite` implementation of the `BoundaryRepository` trait.
pub struct SqliteBoundaryRepository {
    pool: SqlitePool,
}

impl SqliteBoundaryRepository {
    /// Create a new `SQLite` boundary repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_by_id(&self, id: i64) -> Result<Boundary, RepositoryError> {
        let query = format!("SELECT {BOUNDARY_SELECT_COLUMNS} FROM boundaries WHERE id = ?");
        let row = sqlx::query_as::<_, BoundaryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Boundary id {id}")))?;

        row_to_boundary(row)
    }
}

/// Insert one boundary of `set` on `conn`, returning its row ID.
///
/// `set` must be the stored set: the denormalized names are derived from it.
pub(super) async fn insert_boundary_row(
    conn: &mut SqliteConnection,
    set: &BoundarySet,
    boundary: &NewBoundary,
) -> Result<i64, RepositoryError> {
    let names = boundary
        .resolve_names(set)
        .map_err(|e| RepositoryError::Constraint(e.to_string()))?;

    let metadata = encode_json("metadata", &boundary.metadata)?;
    let shape = encode_json("shape", &boundary.shape)?;
    let simple_shape = encode_json("simple_shape", &boundary.simple_shape)?;
    let centroid = boundary
        .centroid
        .as_ref()
        .map(|point| encode_json("centroid", point))
        .transpose()?;

    let result = sqlx::query(
        r#"
        INSERT INTO boundaries (set_slug, set_name, slug, external_id, name, display_name, metadata, shape, simple_shape, centroid)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&set.slug)
    .bind(&names.set_name)
    .bind(&names.slug)
    .bind(&boundary.external_id)
    .bind(&boundary.name)
    .bind(&names.display_name)
    .bind(&metadata)
    .bind(&shape)
    .bind(&simple_shape)
    .bind(&centroid)
    .execute(conn)
    .await
    .map_err(|e| map_sqlx_error(e, &format!("Boundary '{}/{}'", set.slug, names.slug)))?;

    Ok(result.last_insert_rowid())
}

#[async_trait]
impl BoundaryRepository for SqliteBoundaryRepository {
    async fn list_summaries(
        &self,
        filter: &BoundaryFilter,
    ) -> Result<Vec<BoundarySummary>, RepositoryError> {
        let mut builder = QueryBuilder::<Sqlite>::new(summary_select());
        builder.push(" WHERE 1 = 1");
        if let Some(set_slug) = &filter.set_slug {
            builder.push(" AND set_slug = ").push_bind(set_slug);
        }
        if let Some(name) = &filter.name {
            builder.push(" AND name = ").push_bind(name);
        }
        if let Some(external_id) = &filter.external_id {
            builder.push(" AND external_id = ").push_bind(external_id);
        }
        builder.push(" ORDER BY set_slug, name, slug");
        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows: Vec<SummaryRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(BoundarySummary::from).collect())
    }

    async fn get(&self, set_slug: &str, slug: &str) -> Result<Boundary, RepositoryError> {
        let query = format!(
            "SELECT {BOUNDARY_SELECT_COLUMNS} FROM boundaries WHERE set_slug = ? AND slug = ?"
        );
        let row = sqlx::query_as::<_, BoundaryRow>(&query)
            .bind(set_slug)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Boundary '{set_slug}/{slug}'")))?;

        row_to_boundary(row)
    }

    async fn insert(
        &self,
        set: &BoundarySet,
        boundary: &NewBoundary,
    ) -> Result<Boundary, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // Names come from the stored set; the caller's copy may predate a rename.
        let query = format!("SELECT {SET_SELECT_COLUMNS} FROM boundary_sets WHERE slug = ?");
        let stored = sqlx::query_as::<_, BoundarySetRow>(&query)
            .bind(&set.slug)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| {
                RepositoryError::Constraint(format!("Boundary set '{}' does not exist", set.slug))
            })
            .and_then(row_to_set)?;

        if stored.name != set.name {
            tracing::debug!(
                set = %set.slug,
                given = %set.name,
                stored = %stored.name,
                "Deriving boundary names from the stored set"
            );
        }

        let id = insert_boundary_row(&mut *tx, &stored, boundary).await?;
        tx.commit().await.map_err(storage_error)?;

        self.get_by_id(id).await
    }

    async fn delete(&self, set_slug: &str, slug: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM boundaries WHERE set_slug = ? AND slug = ?")
            .bind(set_slug)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Boundary '{set_slug}/{slug}'"
            )));
        }

        Ok(())
    }

    async fn count_for_set(&self, set_slug: &str) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boundaries WHERE set_slug = ?")
            .bind(set_slug)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{austin, community_areas, square_boundary, wards};
    use crate::repositories::SqliteBoundarySetRepository;
    use crate::setup::setup_test_database;
    use boundaries_core::BoundarySetRepository;

    async fn setup_repos() -> (SqliteBoundarySetRepository, SqliteBoundaryRepository) {
        let pool = setup_test_database().await.unwrap();
        (
            SqliteBoundarySetRepository::new(pool.clone()),
            SqliteBoundaryRepository::new(pool),
        )
    }

    #[tokio::test]
    async fn test_insert_derives_names_and_slug() {
        let (sets, repo) = setup_repos().await;
        let areas = sets.insert(&community_areas()).await.unwrap();

        let stored = repo.insert(&areas, &austin()).await.unwrap();
        assert_eq!(stored.slug, "austin");
        assert_eq!(stored.set_slug, "community-areas");
        assert_eq!(stored.set_name, "Community Areas");
        assert_eq!(stored.display_name, "Community Area Austin");
        assert_eq!(stored.metadata["COMMUNITY"], "AUSTIN");
        assert!(stored.centroid.is_some());
        assert_eq!(stored.shape.vertex_count(), austin().shape.vertex_count());
    }

    #[tokio::test]
    async fn test_slug_unique_within_set_only() {
        let (sets, repo) = setup_repos().await;
        let areas = sets.insert(&community_areas()).await.unwrap();
        let ward_set = sets.insert(&wards()).await.unwrap();

        repo.insert(&areas, &square_boundary("community-areas", "1", "North"))
            .await
            .unwrap();

        let err = repo
            .insert(&areas, &square_boundary("community-areas", "2", "North"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));

        repo.insert(&ward_set, &square_boundary("wards", "1", "North"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_into_missing_set_is_constraint_error() {
        let (_sets, repo) = setup_repos().await;
        let unsaved = wards();

        let err = repo
            .insert(&unsaved, &square_boundary("wards", "1", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_insert_with_stale_set_uses_stored_names() {
        let (sets, repo) = setup_repos().await;
        let stale = sets.insert(&wards()).await.unwrap();

        let mut renamed = stale.clone();
        renamed.name = "Aldermanic Wards".to_string();
        renamed.singular = "Aldermanic Ward".to_string();
        renamed.kind_first = true;
        sets.update(&renamed).await.unwrap();

        let stored = repo
            .insert(&stale, &square_boundary("wards", "1", "1"))
            .await
            .unwrap();
        assert_eq!(stored.set_name, "Aldermanic Wards");
        assert_eq!(stored.display_name, "Aldermanic Ward 1");
    }

    #[tokio::test]
    async fn test_summaries_filtered_and_ordered() {
        let (sets, repo) = setup_repos().await;
        let areas = sets.insert(&community_areas()).await.unwrap();
        let ward_set = sets.insert(&wards()).await.unwrap();

        for (id, name) in [("3", "Uptown"), ("1", "Albany Park"), ("2", "Lincoln Park")] {
            repo.insert(&areas, &square_boundary("community-areas", id, name))
                .await
                .unwrap();
        }
        repo.insert(&ward_set, &square_boundary("wards", "1", "1"))
            .await
            .unwrap();

        let all = repo.list_summaries(&BoundaryFilter::default()).await.unwrap();
        let keys: Vec<(String, String)> = all
            .iter()
            .map(|s| (s.set_slug.clone(), s.name.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("community-areas".to_string(), "Albany Park".to_string()),
                ("community-areas".to_string(), "Lincoln Park".to_string()),
                ("community-areas".to_string(), "Uptown".to_string()),
                ("wards".to_string(), "1".to_string()),
            ]
        );

        let wards_only = repo
            .list_summaries(&BoundaryFilter::for_set("wards"))
            .await
            .unwrap();
        assert_eq!(wards_only.len(), 1);
        assert_eq!(wards_only[0].display_name, "1 Ward");
        assert_eq!(wards_only[0].set_name, "Wards");

        let limited = BoundaryFilter {
            limit: Some(2),
            ..BoundaryFilter::for_set("community-areas")
        };
        assert_eq!(repo.list_summaries(&limited).await.unwrap().len(), 2);

        let by_external_id = BoundaryFilter {
            external_id: Some("2".to_string()),
            ..BoundaryFilter::default()
        };
        let found = repo.list_summaries(&by_external_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "lincoln-park");
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let (sets, repo) = setup_repos().await;
        let areas = sets.insert(&community_areas()).await.unwrap();
        repo.insert(&areas, &austin()).await.unwrap();

        let fetched = repo.get("community-areas", "austin").await.unwrap();
        assert_eq!(fetched.external_id, "25");
        assert_eq!(repo.count_for_set("community-areas").await.unwrap(), 1);

        repo.delete("community-areas", "austin").await.unwrap();
        assert!(matches!(
            repo.get("community-areas", "austin").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete("community-areas", "austin").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert_eq!(repo.count_for_set("community-areas").await.unwrap(), 0);
    }
}
