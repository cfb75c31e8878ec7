use chrono::Utc;
use tracing::{info, warn};

use super::listing::paginate_posts;
use crate::data::catalog_repository::CatalogRepository;
use crate::data::media_storage::{MediaStorage, post_image_key};
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::catalog::Category;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::domain::viewer::Viewer;
use crate::domain::visibility::{PostFilter, ensure_post_author, ensure_post_readable};

#[derive(Debug, Clone)]
pub(crate) struct CategoryPostsResult {
    pub(crate) category: Category,
    pub(crate) posts: Page<Post>,
}

#[derive(Debug, Clone)]
pub(crate) struct ImageUpload {
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
}

pub(crate) struct BlogService<P: PostRepository, C: CatalogRepository, S: MediaStorage> {
    repo: P,
    catalog: C,
    media: S,
}

impl<P: PostRepository, C: CatalogRepository, S: MediaStorage> BlogService<P, C, S> {
    pub(crate) fn new(repo: P, catalog: C, media: S) -> Self {
        Self {
            repo,
            catalog,
            media,
        }
    }

    pub(crate) async fn list_posts(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        paginate_posts(&self.repo, PostFilter::index(Utc::now()), page).await
    }

    /// A hidden category is reported as missing, never as an empty page.
    pub(crate) async fn category_posts(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<CategoryPostsResult, DomainError> {
        let now = Utc::now();
        let category = self
            .catalog
            .find_category_by_slug(slug)
            .await?
            .filter(|category| category.is_published)
            .ok_or_else(|| DomainError::category_not_found(slug))?;

        let posts = paginate_posts(&self.repo, PostFilter::category(category.id, now), page).await?;
        Ok(CategoryPostsResult { category, posts })
    }

    pub(crate) async fn get_post(&self, viewer: Viewer, id: i64) -> Result<Post, DomainError> {
        let now = Utc::now();
        let post = self
            .repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        ensure_post_readable(&post, viewer, now)?;
        Ok(post)
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            text: req.text,
            pub_date: req.pub_date.unwrap_or_else(Utc::now),
            author_id,
            category_id: req.category_id,
            location_id: req.location_id,
            is_published: req.is_published,
        };
        let post = self.repo.create_post(new_post).await?;
        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        self.load_owned(actor_user_id, post_id).await?;

        let patch = PostPatch {
            title: req.title,
            text: req.text,
            pub_date: req.pub_date,
            category_id: req.category_id,
            location_id: req.location_id,
            is_published: req.is_published,
        };
        self.repo
            .update_post_owned(post_id, actor_user_id, patch)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let original_post = self.load_owned(actor_user_id, post_id).await?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::post_not_found(post_id));
        }
        if let Some(image) = original_post.image.as_deref() {
            self.discard_image(image).await;
        }
        info!(post_id, author_id = actor_user_id, "post deleted");
        Ok(())
    }

    /// Stores the new file before pointing the post at it; the previous file is
    /// removed afterwards.
    pub(crate) async fn attach_image(
        &self,
        actor_user_id: i64,
        post_id: i64,
        upload: ImageUpload,
    ) -> Result<Post, DomainError> {
        let original_post = self.load_owned(actor_user_id, post_id).await?;
        if upload.bytes.is_empty() {
            return Err(DomainError::Validation {
                field: "image",
                message: "must not be empty",
            });
        }

        let key = post_image_key(post_id, &upload.file_name, Utc::now())?;
        self.media.save(&key, &upload.bytes).await?;

        let updated = self
            .repo
            .set_post_image(post_id, actor_user_id, Some(key.clone()))
            .await?;
        let Some(post) = updated else {
            self.discard_image(&key).await;
            return Err(DomainError::post_not_found(post_id));
        };

        if let Some(previous) = original_post.image.as_deref()
            && previous != key
        {
            self.discard_image(previous).await;
        }
        Ok(post)
    }

    async fn load_owned(&self, actor_user_id: i64, post_id: i64) -> Result<Post, DomainError> {
        let post = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        ensure_post_author(&post, actor_user_id)?;
        Ok(post)
    }

    async fn discard_image(&self, key: &str) {
        if let Err(err) = self.media.remove(key).await {
            warn!(key, error = %err, "failed to remove stored image");
        }
    }
}
