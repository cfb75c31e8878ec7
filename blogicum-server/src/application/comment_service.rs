use chrono::Utc;
use tracing::info;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, CommentRequest};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::viewer::Viewer;
use crate::domain::visibility::{ensure_comment_author, ensure_post_readable};

pub(crate) struct CommentService<P: PostRepository, M: CommentRepository> {
    posts: P,
    repo: M,
}

impl<P: PostRepository, M: CommentRepository> CommentService<P, M> {
    pub(crate) fn new(posts: P, repo: M) -> Self {
        Self { posts, repo }
    }

    /// Takes a post the caller has already been allowed to read.
    pub(crate) async fn comments_for(&self, post: &Post) -> Result<Vec<Comment>, DomainError> {
        self.repo.list_comments(post.id).await
    }

    /// Commenting requires the same access as reading the post.
    pub(crate) async fn add_comment(
        &self,
        author_id: i64,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        ensure_post_readable(&post, Viewer::User(author_id), Utc::now())?;

        let comment = self
            .repo
            .create_comment(NewComment {
                text: req.text,
                post_id,
                author_id,
            })
            .await?;
        info!(comment_id = comment.id, post_id, author_id, "comment added");
        Ok(comment)
    }

    pub(crate) async fn update_comment(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        self.load_owned(actor_user_id, post_id, comment_id).await?;

        self.repo
            .update_comment_text(comment_id, req.text)
            .await?
            .ok_or_else(|| DomainError::comment_not_found(comment_id))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        self.load_owned(actor_user_id, post_id, comment_id).await?;

        if !self.repo.delete_comment(comment_id).await? {
            return Err(DomainError::comment_not_found(comment_id));
        }
        info!(comment_id, post_id, author_id = actor_user_id, "comment deleted");
        Ok(())
    }

    /// A comment addressed through the wrong post does not exist for the caller.
    async fn load_owned(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .repo
            .get_comment(comment_id)
            .await?
            .filter(|comment| comment.post_id == post_id)
            .ok_or_else(|| DomainError::comment_not_found(comment_id))?;
        ensure_comment_author(&comment, actor_user_id)?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::CommentService;
    use crate::data::post_repository::PostRepository;
    use crate::domain::comment::CommentRequest;
    use crate::domain::error::DomainError;
    use crate::test_support::InMemoryBlog;

    fn service(store: &InMemoryBlog) -> CommentService<InMemoryBlog, InMemoryBlog> {
        CommentService::new(store.clone(), store.clone())
    }

    fn request(text: &str) -> CommentRequest {
        CommentRequest {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn add_comment_to_public_post() {
        let store = InMemoryBlog::new();
        let author = store.add_user("author");
        let reader = store.add_user("reader");
        let open = store.add_category("open", true);
        let post = store.add_post(author, Some(open), Utc::now() - Duration::hours(1), true);

        let comment = service(&store)
            .add_comment(reader, post, request("  great  "))
            .await
            .expect("comment must be added");
        assert_eq!(comment.text, "great");
        assert_eq!(comment.post_id, post);
        assert_eq!(comment.author_username, "reader");
        assert_eq!(store.comment_count(post), 1);
    }

    #[tokio::test]
    async fn add_comment_to_hidden_post_is_not_found() {
        let store = InMemoryBlog::new();
        let author = store.add_user("author");
        let reader = store.add_user("reader");
        let open = store.add_category("open", true);
        let draft = store.add_post(author, Some(open), Utc::now(), false);

        let err = service(&store)
            .add_comment(reader, draft, request("hello"))
            .await
            .expect_err("draft must be hidden");
        assert!(matches!(err, DomainError::NotFound(_)));

        service(&store)
            .add_comment(author, draft, request("note to self"))
            .await
            .expect("author may comment on own draft");
    }

    #[tokio::test]
    async fn comments_are_listed_oldest_first() {
        let store = InMemoryBlog::new();
        let author = store.add_user("author");
        let post_id = store.add_post(author, None, Utc::now(), true);
        let first = store.add_comment(post_id, author);
        let second = store.add_comment(post_id, author);
        let post = store
            .get_post(post_id)
            .await
            .expect("lookup must succeed")
            .expect("post must exist");

        let comments = service(&store)
            .comments_for(&post)
            .await
            .expect("comments must load");
        let ids: Vec<i64> = comments.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn only_comment_author_may_edit_or_delete() {
        let store = InMemoryBlog::new();
        let post_author = store.add_user("author");
        let commenter = store.add_user("commenter");
        let stranger = store.add_user("stranger");
        let post = store.add_post(post_author, None, Utc::now(), true);
        let comment = store.add_comment(post, commenter);
        let service = service(&store);

        for actor in [post_author, stranger] {
            let err = service
                .update_comment(actor, post, comment, request("hijack"))
                .await
                .expect_err("edit must be forbidden");
            assert!(matches!(err, DomainError::Forbidden));

            let err = service
                .delete_comment(actor, post, comment)
                .await
                .expect_err("delete must be forbidden");
            assert!(matches!(err, DomainError::Forbidden));
        }

        let updated = service
            .update_comment(commenter, post, comment, request("edited"))
            .await
            .expect("author edit must succeed");
        assert_eq!(updated.text, "edited");

        service
            .delete_comment(commenter, post, comment)
            .await
            .expect("author delete must succeed");
        assert_eq!(store.comment_count(post), 0);
    }

    #[tokio::test]
    async fn comment_under_other_post_is_not_found() {
        let store = InMemoryBlog::new();
        let author = store.add_user("author");
        let post = store.add_post(author, None, Utc::now(), true);
        let other_post = store.add_post(author, None, Utc::now(), true);
        let comment = store.add_comment(post, author);

        let err = service(&store)
            .delete_comment(author, other_post, comment)
            .await
            .expect_err("wrong post must not resolve the comment");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(store.comment_count(post), 1);
    }

    #[tokio::test]
    async fn missing_comment_is_not_found() {
        let store = InMemoryBlog::new();
        let author = store.add_user("author");
        let post = store.add_post(author, None, Utc::now(), true);

        let err = service(&store)
            .update_comment(author, post, 999, request("text"))
            .await
            .expect_err("missing comment");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
