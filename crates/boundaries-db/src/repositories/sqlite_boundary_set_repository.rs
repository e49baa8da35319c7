//! `SQLite` implementation of the `BoundarySetRepository` trait.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use boundaries_core::{BoundarySet, BoundarySetRepository, NewBoundary, RepositoryError};

use super::row_mappers::{
    BoundarySetRow, SET_SELECT_COLUMNS, hierarchy_code, map_sqlx_error, row_to_set, storage_error,
};
use super::sqlite_boundary_repository::insert_boundary_row;

/// `SQLite` implementation of the `BoundarySetRepository` trait.
pub struct SqliteBoundarySetRepository {
    pool: SqlitePool,
}

impl SqliteBoundarySetRepository {
    /// Create a new `SQLite` boundary set repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_set_row(
    conn: &mut SqliteConnection,
    set: &BoundarySet,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        INSERT INTO boundary_sets (slug, name, singular, kind_first, authority, domain, hierarchy, last_updated, href, notes, count, metadata_fields)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&set.slug)
    .bind(&set.name)
    .bind(&set.singular)
    .bind(set.kind_first)
    .bind(&set.authority)
    .bind(&set.domain)
    .bind(hierarchy_code(set.hierarchy))
    .bind(set.last_updated)
    .bind(&set.href)
    .bind(&set.notes)
    .bind(set.count)
    .bind(set.metadata_fields.encode())
    .execute(conn)
    .await
    .map_err(|e| map_sqlx_error(e, &format!("Boundary set '{}' ({})", set.slug, set.name)))?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct MemberNamingRow {
    name: String,
    singular: String,
    kind_first: bool,
}

#[async_trait]
impl BoundarySetRepository for SqliteBoundarySetRepository {
    async fn list(&self) -> Result<Vec<BoundarySet>, RepositoryError> {
        let query = format!("SELECT {SET_SELECT_COLUMNS} FROM boundary_sets ORDER BY name");
        let rows = sqlx::query_as::<_, BoundarySetRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.into_iter().map(row_to_set).collect()
    }

    async fn get(&self, slug: &str) -> Result<BoundarySet, RepositoryError> {
        let query = format!("SELECT {SET_SELECT_COLUMNS} FROM boundary_sets WHERE slug = ?");
        let row = sqlx::query_as::<_, BoundarySetRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Boundary set '{slug}'")))?;

        row_to_set(row)
    }

    async fn insert(&self, set: &BoundarySet) -> Result<BoundarySet, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(storage_error)?;
        insert_set_row(&mut *conn, set).await?;
        drop(conn);

        self.get(&set.slug).await
    }

    async fn update(&self, set: &BoundarySet) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let previous = sqlx::query_as::<_, MemberNamingRow>(
            "SELECT name, singular, kind_first FROM boundary_sets WHERE slug = ?",
        )
        .bind(&set.slug)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("Boundary set '{}'", set.slug)))?;

        sqlx::query(
            r#"
            UPDATE boundary_sets
            SET name = ?, singular = ?, kind_first = ?, authority = ?, domain = ?, hierarchy = ?,
                last_updated = ?, href = ?, notes = ?, count = ?, metadata_fields = ?
            WHERE slug = ?
            "#,
        )
        .bind(&set.name)
        .bind(&set.singular)
        .bind(set.kind_first)
        .bind(&set.authority)
        .bind(&set.domain)
        .bind(hierarchy_code(set.hierarchy))
        .bind(set.last_updated)
        .bind(&set.href)
        .bind(&set.notes)
        .bind(set.count)
        .bind(set.metadata_fields.encode())
        .bind(&set.slug)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, &format!("Boundary set name '{}'", set.name)))?;

        let naming_changed = previous.name != set.name
            || previous.singular != set.singular
            || previous.kind_first != set.kind_first;

        if naming_changed {
            // display_name must match BoundarySet::display_name_for
            let sql = if set.kind_first {
                "UPDATE boundaries SET set_name = ?, display_name = ? || ' ' || name WHERE set_slug = ?"
            } else {
                "UPDATE boundaries SET set_name = ?, display_name = name || ' ' || ? WHERE set_slug = ?"
            };
            let result = sqlx::query(sql)
                .bind(&set.name)
                .bind(&set.singular)
                .bind(&set.slug)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;

            tracing::debug!(
                set = %set.slug,
                boundaries = result.rows_affected(),
                "Re-synced boundary names"
            );
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(())
    }

    async fn replace(
        &self,
        set: &BoundarySet,
        boundaries: &[NewBoundary],
    ) -> Result<BoundarySet, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let removed = sqlx::query("DELETE FROM boundary_sets WHERE slug = ?")
            .bind(&set.slug)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?
            .rows_affected();

        insert_set_row(&mut *tx, set).await?;
        for boundary in boundaries {
            insert_boundary_row(&mut *tx, set, boundary).await?;
        }

        tx.commit().await.map_err(storage_error)?;
        tracing::debug!(
            set = %set.slug,
            replaced = removed > 0,
            boundaries = boundaries.len(),
            "Stored boundary set with its boundaries"
        );

        self.get(&set.slug).await
    }

    async fn delete(&self, slug: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM boundary_sets WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Boundary set '{slug}'")));
        }

        Ok(())
    }
}
