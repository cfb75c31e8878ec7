//! Who may see or touch which post and comment.
//!
//! A post is publicly visible when it is published, belongs to a published
//! category and its `pub_date` is not in the future. Every read path builds a
//! [`PostFilter`] (listings) or calls [`ensure_post_readable`] (single post);
//! the repositories translate the filter into their own query language and
//! must keep [`PostFilter::matches`] as the reference semantics.

use chrono::{DateTime, Utc};

use super::comment::Comment;
use super::error::DomainError;
use super::post::Post;
use super::viewer::Viewer;

pub(crate) fn is_publicly_visible(post: &Post, now: DateTime<Utc>) -> bool {
    post.is_published
        && post
            .category
            .as_ref()
            .is_some_and(|category| category.is_published)
        && post.pub_date <= now
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PostScope {
    All,
    Category(i64),
    Author(i64),
}

/// Listing query: which posts, and whether only publicly visible ones count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostFilter {
    pub(crate) scope: PostScope,
    pub(crate) public_only: bool,
    pub(crate) now: DateTime<Utc>,
}

impl PostFilter {
    pub(crate) fn index(now: DateTime<Utc>) -> Self {
        Self {
            scope: PostScope::All,
            public_only: true,
            now,
        }
    }

    /// The caller has already checked that the category itself is published.
    pub(crate) fn category(category_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            scope: PostScope::Category(category_id),
            public_only: true,
            now,
        }
    }

    /// Owners see all of their posts, everyone else only the public ones.
    pub(crate) fn profile(author_id: i64, viewer: Viewer, now: DateTime<Utc>) -> Self {
        Self {
            scope: PostScope::Author(author_id),
            public_only: !viewer.is_user(author_id),
            now,
        }
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        let in_scope = match self.scope {
            PostScope::All => true,
            PostScope::Category(category_id) => post
                .category
                .as_ref()
                .is_some_and(|category| category.id == category_id),
            PostScope::Author(author_id) => post.author_id == author_id,
        };
        in_scope && (!self.public_only || is_publicly_visible(post, self.now))
    }
}

/// Authors always reach their own post; others only a publicly visible one.
pub(crate) fn ensure_post_readable(
    post: &Post,
    viewer: Viewer,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if viewer.is_user(post.author_id) || is_publicly_visible(post, now) {
        return Ok(());
    }
    Err(DomainError::post_not_found(post.id))
}

pub(crate) fn ensure_post_author(post: &Post, actor_user_id: i64) -> Result<(), DomainError> {
    if post.is_authored_by(actor_user_id) {
        return Ok(());
    }
    Err(DomainError::Forbidden)
}

/// Post authorship grants nothing over other people's comments.
pub(crate) fn ensure_comment_author(
    comment: &Comment,
    actor_user_id: i64,
) -> Result<(), DomainError> {
    if comment.is_authored_by(actor_user_id) {
        return Ok(());
    }
    Err(DomainError::Forbidden)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{
        PostFilter, PostScope, ensure_comment_author, ensure_post_author, ensure_post_readable,
        is_publicly_visible,
    };
    use crate::domain::error::DomainError;
    use crate::domain::viewer::Viewer;
    use crate::test_support::{sample_comment, sample_post};

    #[test]
    fn published_post_in_published_category_is_visible() {
        let now = Utc::now();
        let post = sample_post(1, 10).category(3, true).pub_date(now - Duration::hours(1)).build();
        assert!(is_publicly_visible(&post, now));
    }

    #[test]
    fn each_flag_hides_the_post() {
        let now = Utc::now();
        let past = now - Duration::minutes(5);

        let unpublished = sample_post(1, 10)
            .category(3, true)
            .pub_date(past)
            .published(false)
            .build();
        let hidden_category = sample_post(2, 10).category(3, false).pub_date(past).build();
        let future = sample_post(3, 10)
            .category(3, true)
            .pub_date(now + Duration::hours(1))
            .build();
        let no_category = sample_post(4, 10).pub_date(past).build();

        for post in [unpublished, hidden_category, future, no_category] {
            assert!(!is_publicly_visible(&post, now), "post {} must be hidden", post.id);
        }
    }

    #[test]
    fn pub_date_equal_to_now_is_visible() {
        let now = Utc::now();
        let post = sample_post(1, 10).category(3, true).pub_date(now).build();
        assert!(is_publicly_visible(&post, now));
    }

    #[test]
    fn profile_filter_bypasses_visibility_for_owner_only() {
        let now = Utc::now();
        let draft = sample_post(1, 10).category(3, true).published(false).build();

        let own = PostFilter::profile(10, Viewer::User(10), now);
        assert!(!own.public_only);
        assert!(own.matches(&draft));

        let stranger = PostFilter::profile(10, Viewer::User(11), now);
        assert!(stranger.public_only);
        assert!(!stranger.matches(&draft));

        let anonymous = PostFilter::profile(10, Viewer::Anonymous, now);
        assert!(!anonymous.matches(&draft));
    }

    #[test]
    fn scope_limits_matches() {
        let now = Utc::now();
        let post = sample_post(1, 10)
            .category(3, true)
            .pub_date(now - Duration::hours(1))
            .build();

        assert!(PostFilter::index(now).matches(&post));
        assert!(PostFilter::category(3, now).matches(&post));
        assert!(!PostFilter::category(4, now).matches(&post));
        assert!(!PostFilter::profile(11, Viewer::User(11), now).matches(&post));
        assert_eq!(PostFilter::category(3, now).scope, PostScope::Category(3));
    }

    #[test]
    fn future_post_is_readable_by_author_only() {
        let now = Utc::now();
        let post = sample_post(5, 10)
            .category(3, true)
            .pub_date(now + Duration::hours(1))
            .build();

        assert!(ensure_post_readable(&post, Viewer::User(10), now).is_ok());
        assert!(matches!(
            ensure_post_readable(&post, Viewer::User(11), now),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            ensure_post_readable(&post, Viewer::Anonymous, now),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn only_author_may_mutate_post() {
        let post = sample_post(5, 10).build();
        assert!(ensure_post_author(&post, 10).is_ok());
        assert!(matches!(
            ensure_post_author(&post, 11),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn post_author_cannot_mutate_foreign_comment() {
        let comment = sample_comment(1, 5, 20);
        assert!(ensure_comment_author(&comment, 20).is_ok());
        assert!(matches!(
            ensure_comment_author(&comment, 10),
            Err(DomainError::Forbidden)
        ));
    }
}
