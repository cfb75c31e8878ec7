//! Fixtures and an in-memory store implementing every repository trait.
//! Listing goes through [`PostFilter::matches`], so service tests exercise
//! the same visibility rules the Postgres queries mirror.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::data::catalog_repository::{CatalogRepository, NewCategory, NewLocation};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::media_storage::MediaStorage;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::user_repository::{NewUser, ProfilePatch, UserCredentials, UserRepository};
use crate::domain::catalog::{Category, Location};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::pagination::Pagination;
use crate::domain::post::{CategoryRef, LocationRef, Post};
use crate::domain::user::User;
use crate::domain::visibility::PostFilter;

pub(crate) struct PostBuilder {
    post: Post,
}

pub(crate) fn sample_post(id: i64, author_id: i64) -> PostBuilder {
    let created_at = Utc::now() - Duration::days(1);
    PostBuilder {
        post: Post {
            id,
            title: format!("post {id}"),
            text: "body".to_string(),
            pub_date: created_at,
            author_id,
            author_username: format!("user_{author_id}"),
            category: None,
            location: None,
            image: None,
            is_published: true,
            comment_count: 0,
            created_at,
            updated_at: created_at,
        },
    }
}

impl PostBuilder {
    pub(crate) fn category(mut self, id: i64, is_published: bool) -> Self {
        self.post.category = Some(CategoryRef {
            id,
            title: format!("category {id}"),
            slug: format!("category-{id}"),
            is_published,
        });
        self
    }

    pub(crate) fn location(mut self, id: i64, is_published: bool) -> Self {
        self.post.location = Some(LocationRef {
            id,
            name: format!("location {id}"),
            is_published,
        });
        self
    }

    pub(crate) fn pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.post.pub_date = pub_date;
        self
    }

    pub(crate) fn published(mut self, is_published: bool) -> Self {
        self.post.is_published = is_published;
        self
    }

    pub(crate) fn build(self) -> Post {
        self.post
    }
}

pub(crate) fn sample_comment(id: i64, post_id: i64, author_id: i64) -> Comment {
    Comment {
        id,
        text: format!("comment {id}"),
        post_id,
        author_id,
        author_username: format!("user_{author_id}"),
        created_at: Utc::now(),
    }
}

pub(crate) fn sample_user(id: i64, username: &str) -> User {
    User::new(id, username, format!("{username}@example.com"), Utc::now())
        .expect("sample user must be valid")
}

#[derive(Debug, Clone)]
struct StoredPost {
    id: i64,
    title: String,
    text: String,
    pub_date: DateTime<Utc>,
    author_id: i64,
    category_id: Option<i64>,
    location_id: Option<i64>,
    image: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    posts: Vec<StoredPost>,
    comments: Vec<Comment>,
    media: HashMap<String, Vec<u8>>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn username(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(user, _)| user.username.clone())
            .unwrap_or_default()
    }

    fn hydrate(&self, stored: &StoredPost) -> Post {
        let category = stored.category_id.and_then(|id| {
            self.categories
                .iter()
                .find(|category| category.id == id)
                .map(|category| CategoryRef {
                    id: category.id,
                    title: category.title.clone(),
                    slug: category.slug.clone(),
                    is_published: category.is_published,
                })
        });
        let location = stored.location_id.and_then(|id| {
            self.locations
                .iter()
                .find(|location| location.id == id)
                .map(|location| LocationRef {
                    id: location.id,
                    name: location.name.clone(),
                    is_published: location.is_published,
                })
        });
        let comment_count = self
            .comments
            .iter()
            .filter(|comment| comment.post_id == stored.id)
            .count() as i64;

        Post {
            id: stored.id,
            title: stored.title.clone(),
            text: stored.text.clone(),
            pub_date: stored.pub_date,
            author_id: stored.author_id,
            author_username: self.username(stored.author_id),
            category,
            location,
            image: stored.image.clone(),
            is_published: stored.is_published,
            comment_count,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    fn check_references(
        &self,
        category_id: Option<i64>,
        location_id: Option<i64>,
    ) -> Result<(), DomainError> {
        if let Some(id) = category_id
            && !self.categories.iter().any(|category| category.id == id)
        {
            return Err(DomainError::NotFound("category".to_string()));
        }
        if let Some(id) = location_id
            && !self.locations.iter().any(|location| location.id == id)
        {
            return Err(DomainError::NotFound("location".to_string()));
        }
        Ok(())
    }
}

/// Cheap to clone; clones share the same data.
#[derive(Clone, Default)]
pub(crate) struct InMemoryBlog {
    state: Arc<Mutex<State>>,
}

impl InMemoryBlog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory blog mutex poisoned")
    }

    pub(crate) fn add_user(&self, username: &str) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        state
            .users
            .push((sample_user(id, username), "unused-hash".to_string()));
        id
    }

    pub(crate) fn add_category(&self, slug: &str, is_published: bool) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        state.categories.push(Category {
            id,
            title: slug.to_uppercase(),
            description: String::new(),
            slug: slug.to_string(),
            is_published,
            created_at: Utc::now(),
        });
        id
    }

    pub(crate) fn add_location(&self, name: &str, is_published: bool) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        state.locations.push(Location {
            id,
            name: name.to_string(),
            is_published,
            created_at: Utc::now(),
        });
        id
    }

    pub(crate) fn add_post(
        &self,
        author_id: i64,
        category_id: Option<i64>,
        pub_date: DateTime<Utc>,
        is_published: bool,
    ) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        let now = Utc::now();
        state.posts.push(StoredPost {
            id,
            title: format!("post {id}"),
            text: "body".to_string(),
            pub_date,
            author_id,
            category_id,
            location_id: None,
            image: None,
            is_published,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub(crate) fn add_comment(&self, post_id: i64, author_id: i64) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        let author_username = state.username(author_id);
        state.comments.push(Comment {
            id,
            text: format!("comment {id}"),
            post_id,
            author_id,
            author_username,
            created_at: Utc::now(),
        });
        id
    }

    pub(crate) fn comment_count(&self, post_id: i64) -> usize {
        self.lock()
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .count()
    }

    pub(crate) fn media_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().media.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl PostRepository for InMemoryBlog {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.lock();
        state.check_references(input.category_id, input.location_id)?;
        let id = state.next_id();
        let now = Utc::now();
        let stored = StoredPost {
            id,
            title: input.title,
            text: input.text,
            pub_date: input.pub_date,
            author_id: input.author_id,
            category_id: input.category_id,
            location_id: input.location_id,
            image: None,
            is_published: input.is_published,
            created_at: now,
            updated_at: now,
        };
        let post = state.hydrate(&stored);
        state.posts.push(stored);
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.lock();
        Ok(state
            .posts
            .iter()
            .find(|post| post.id == id)
            .map(|post| state.hydrate(post)))
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock();
        state.check_references(patch.category_id, patch.location_id)?;
        let Some(stored) = state
            .posts
            .iter_mut()
            .find(|post| post.id == post_id && post.author_id == owner_id)
        else {
            return Ok(None);
        };
        stored.title = patch.title;
        stored.text = patch.text;
        if let Some(pub_date) = patch.pub_date {
            stored.pub_date = pub_date;
        }
        stored.category_id = patch.category_id;
        stored.location_id = patch.location_id;
        stored.is_published = patch.is_published;
        stored.updated_at = Utc::now();
        let stored = stored.clone();
        Ok(Some(state.hydrate(&stored)))
    }

    async fn set_post_image(
        &self,
        post_id: i64,
        owner_id: i64,
        image: Option<String>,
    ) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock();
        let Some(stored) = state
            .posts
            .iter_mut()
            .find(|post| post.id == post_id && post.author_id == owner_id)
        else {
            return Ok(None);
        };
        stored.image = image;
        let stored = stored.clone();
        Ok(Some(state.hydrate(&stored)))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        let deleted = state.posts.len() != before;
        if deleted {
            state.comments.retain(|comment| comment.post_id != id);
        }
        Ok(deleted)
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let state = self.lock();
        let mut posts: Vec<Post> = state
            .posts
            .iter()
            .map(|post| state.hydrate(post))
            .filter(|post| filter.matches(post))
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DomainError> {
        let state = self.lock();
        Ok(state
            .posts
            .iter()
            .map(|post| state.hydrate(post))
            .filter(|post| filter.matches(post))
            .count() as i64)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlog {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.lock();
        if !state.posts.iter().any(|post| post.id == input.post_id) {
            return Err(DomainError::NotFound("post".to_string()));
        }
        let id = state.next_id();
        let comment = Comment {
            id,
            text: input.text,
            post_id: input.post_id,
            author_id: input.author_id,
            author_username: state.username(input.author_id),
            created_at: Utc::now(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .lock()
            .comments
            .iter()
            .find(|comment| comment.id == id)
            .cloned())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .lock()
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn update_comment_text(
        &self,
        id: i64,
        text: String,
    ) -> Result<Option<Comment>, DomainError> {
        let mut state = self.lock();
        Ok(state
            .comments
            .iter_mut()
            .find(|comment| comment.id == id)
            .map(|comment| {
                comment.text = text;
                comment.clone()
            }))
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.comments.len();
        state.comments.retain(|comment| comment.id != id);
        Ok(state.comments.len() != before)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryBlog {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let mut state = self.lock();
        if state
            .categories
            .iter()
            .any(|category| category.slug == input.slug)
        {
            return Err(DomainError::AlreadyExists("category slug".to_string()));
        }
        let category = Category {
            id: state.next_id(),
            title: input.title,
            description: input.description,
            slug: input.slug,
            is_published: input.is_published,
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .lock()
            .categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned())
    }

    async fn set_category_published(
        &self,
        slug: &str,
        is_published: bool,
    ) -> Result<Option<Category>, DomainError> {
        Ok(self
            .lock()
            .categories
            .iter_mut()
            .find(|category| category.slug == slug)
            .map(|category| {
                category.is_published = is_published;
                category.clone()
            }))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.lock().categories.clone())
    }

    async fn create_location(&self, input: NewLocation) -> Result<Location, DomainError> {
        let mut state = self.lock();
        let location = Location {
            id: state.next_id(),
            name: input.name,
            is_published: input.is_published,
            created_at: Utc::now(),
        };
        state.locations.push(location.clone());
        Ok(location)
    }

    async fn set_location_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Location>, DomainError> {
        Ok(self
            .lock()
            .locations
            .iter_mut()
            .find(|location| location.id == id)
            .map(|location| {
                location.is_published = is_published;
                location.clone()
            }))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, DomainError> {
        Ok(self.lock().locations.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlog {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|(user, _)| user.username == input.username)
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        let id = state.next_id();
        let user = User::new(id, input.username, input.email, Utc::now())?;
        state.users.push((user.clone(), input.password_hash));
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(user, password_hash)| UserCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            }))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(user, _)| user.clone()))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.lock();
        let taken = state.users.iter().find(|(user, _)| {
            user.id != user_id && (user.username == patch.username || user.email == patch.email)
        });
        if let Some((user, _)) = taken {
            let resource = if user.username == patch.username {
                "username"
            } else {
                "email"
            };
            return Err(DomainError::AlreadyExists(resource.to_string()));
        }
        Ok(state
            .users
            .iter_mut()
            .find(|(user, _)| user.id == user_id)
            .map(|(user, _)| {
                user.username = patch.username;
                user.email = patch.email;
                user.first_name = patch.first_name;
                user.last_name = patch.last_name;
                user.clone()
            }))
    }
}

#[async_trait]
impl MediaStorage for InMemoryBlog {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.lock().media.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.lock().media.remove(key);
        Ok(())
    }
}
