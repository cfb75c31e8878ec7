use chrono::Utc;
use tracing::info;

use super::listing::paginate_posts;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::{ProfilePatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::post::Post;
use crate::domain::user::{UpdateProfileRequest, User};
use crate::domain::viewer::Viewer;
use crate::domain::visibility::PostFilter;

#[derive(Debug, Clone)]
pub(crate) struct ProfileResult {
    pub(crate) user: User,
    pub(crate) posts: Page<Post>,
}

pub(crate) struct ProfileService<U: UserRepository, P: PostRepository> {
    users: U,
    posts: P,
}

impl<U: UserRepository, P: PostRepository> ProfileService<U, P> {
    pub(crate) fn new(users: U, posts: P) -> Self {
        Self { users, posts }
    }

    pub(crate) async fn profile(
        &self,
        viewer: Viewer,
        username: &str,
        page: PageRequest,
    ) -> Result<ProfileResult, DomainError> {
        let now = Utc::now();
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username))?;

        let filter = PostFilter::profile(user.id, viewer, now);
        let posts = paginate_posts(&self.posts, filter, page).await?;
        Ok(ProfileResult { user, posts })
    }

    /// Users edit only their own profile, addressed by their current username.
    pub(crate) async fn update_profile(
        &self,
        actor_user_id: i64,
        username: &str,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let target = self
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username))?;
        if target.id != actor_user_id {
            return Err(DomainError::Forbidden);
        }

        let req = req.validate()?;
        let patch = ProfilePatch {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        };
        let user = self
            .users
            .update_profile(actor_user_id, patch)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username))?;
        info!(user_id = user.id, "profile updated");
        Ok(user)
    }
}
