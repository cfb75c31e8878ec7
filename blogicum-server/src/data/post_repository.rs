use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::pagination::Pagination;
use crate::domain::post::Post;
use crate::domain::visibility::PostFilter;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: bool,
}

/// Replaces every editable field; `pub_date: None` keeps the stored date.
#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: Option<DateTime<Utc>>,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: bool,
}

/// Listing methods must return exactly the posts for which
/// [`PostFilter::matches`] holds, ordered by `pub_date` desc then `id` desc.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError>;
    async fn set_post_image(
        &self,
        post_id: i64,
        owner_id: i64,
        image: Option<String>,
    ) -> Result<Option<Post>, DomainError>;
    /// Comments of the post go with it.
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError>;
    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DomainError>;
}
