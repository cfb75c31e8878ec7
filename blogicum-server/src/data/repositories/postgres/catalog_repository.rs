use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::catalog_repository::{CatalogRepository, NewCategory, NewLocation};
use crate::domain::catalog::{Category, Location};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
    description: String,
    slug: String,
    is_published: bool,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            title: row.title,
            description: row.description,
            slug: row.slug,
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    is_published: bool,
    created_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            name: row.name,
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (title, description, slug, is_published)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, slug, is_published, created_at
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.slug)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(row.into())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, title, description, slug, is_published, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(row.map(Category::from))
    }

    async fn set_category_published(
        &self,
        slug: &str,
        is_published: bool,
    ) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET is_published = $2
            WHERE slug = $1
            RETURNING id, title, description, slug, is_published, created_at
            "#,
        )
        .bind(slug)
        .bind(is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(row.map(Category::from))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, title, description, slug, is_published, created_at
            FROM categories
            ORDER BY title ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_location(&self, input: NewLocation) -> Result<Location, DomainError> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            INSERT INTO locations (name, is_published)
            VALUES ($1, $2)
            RETURNING id, name, is_published, created_at
            "#,
        )
        .bind(input.name)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(row.into())
    }

    async fn set_location_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Location>, DomainError> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            UPDATE locations
            SET is_published = $2
            WHERE id = $1
            RETURNING id, name, is_published, created_at
            "#,
        )
        .bind(id)
        .bind(is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(row.map(Location::from))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, DomainError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT id, name, is_published, created_at
            FROM locations
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_catalog_db_error)?;

        Ok(rows.into_iter().map(Location::from).collect())
    }
}

fn map_catalog_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::AlreadyExists("category slug".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
