use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::pagination::Pagination;
use crate::domain::post::{CategoryRef, LocationRef, Post};
use crate::domain::visibility::{PostFilter, PostScope};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(POST_SELECT);
        query.push(" WHERE p.id = ").push_bind(id);

        let row = query
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }
}

const POST_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.text,
        p.pub_date,
        p.author_id,
        u.username AS author_username,
        p.image,
        p.is_published,
        p.created_at,
        p.updated_at,
        c.id AS category_id,
        c.title AS category_title,
        c.slug AS category_slug,
        c.is_published AS category_is_published,
        l.id AS location_id,
        l.name AS location_name,
        l.is_published AS location_is_published,
        (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN locations l ON l.id = p.location_id
"#;

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    text: String,
    pub_date: DateTime<Utc>,
    author_id: i64,
    author_username: String,
    image: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: Option<i64>,
    category_title: Option<String>,
    category_slug: Option<String>,
    category_is_published: Option<bool>,
    location_id: Option<i64>,
    location_name: Option<String>,
    location_is_published: Option<bool>,
    comment_count: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let category = match (row.category_id, row.category_title, row.category_slug) {
            (Some(id), Some(title), Some(slug)) => Some(CategoryRef {
                id,
                title,
                slug,
                is_published: row.category_is_published.unwrap_or(false),
            }),
            _ => None,
        };
        let location = match (row.location_id, row.location_name) {
            (Some(id), Some(name)) => Some(LocationRef {
                id,
                name,
                is_published: row.location_is_published.unwrap_or(false),
            }),
            _ => None,
        };

        Post {
            id: row.id,
            title: row.title,
            text: row.text,
            pub_date: row.pub_date,
            author_id: row.author_id,
            author_username: row.author_username,
            category,
            location,
            image: row.image,
            is_published: row.is_published,
            comment_count: row.comment_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// SQL twin of [`PostFilter::matches`]. A post without a category has a NULL
/// `c.is_published` and therefore never passes the public check.
fn push_post_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    query.push(" WHERE TRUE");
    match filter.scope {
        PostScope::All => {}
        PostScope::Category(category_id) => {
            query.push(" AND p.category_id = ").push_bind(category_id);
        }
        PostScope::Author(author_id) => {
            query.push(" AND p.author_id = ").push_bind(author_id);
        }
    }
    if filter.public_only {
        query
            .push(" AND p.is_published AND COALESCE(c.is_published, FALSE) AND p.pub_date <= ")
            .push_bind(filter.now);
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, text, pub_date, author_id, category_id, location_id, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(input.title)
        .bind(input.text)
        .bind(input.pub_date)
        .bind(input.author_id)
        .bind(input.category_id)
        .bind(input.location_id)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        self.fetch_post(id)
            .await?
            .ok_or_else(|| DomainError::Unexpected(format!("post {id} vanished after insert")))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.fetch_post(id).await
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET title = $3,
                text = $4,
                pub_date = COALESCE($5, pub_date),
                category_id = $6,
                location_id = $7,
                is_published = $8,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(patch.title)
        .bind(patch.text)
        .bind(patch.pub_date)
        .bind(patch.category_id)
        .bind(patch.location_id)
        .bind(patch.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match updated {
            Some(id) => self.fetch_post(id).await,
            None => Ok(None),
        }
    }

    async fn set_post_image(
        &self,
        post_id: i64,
        owner_id: i64,
        image: Option<String>,
    ) -> Result<Option<Post>, DomainError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET image = $3,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(image)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match updated {
            Some(id) => self.fetch_post(id).await,
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(POST_SELECT);
        push_post_filter(&mut query, filter);
        query
            .push(" ORDER BY p.pub_date DESC, p.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        let posts: Vec<Post> = rows.into_iter().map(Post::from).collect();
        debug_assert!(posts.iter().all(|post| filter.matches(post)));
        Ok(posts)
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*)
            FROM posts p
            LEFT JOIN categories c ON c.id = p.category_id
            "#,
        );
        push_post_filter(&mut query, filter);

        query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("posts_category_id_fkey") => "category",
            Some("posts_location_id_fkey") => "location",
            _ => "author",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
