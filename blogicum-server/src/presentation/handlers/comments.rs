use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::comment::{Comment, CommentRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CommentInputDto {
    #[validate(length(min = 1))]
    pub(crate) text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            post_id: comment.post_id,
            author_id: comment.author_id,
            author_username: comment.author_username,
            created_at: comment.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/posts/{id}/comment/",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = CommentInputDto,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found or not visible"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn add_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(post_id): Path<i64>,
    Json(dto): Json<CommentInputDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .comment_service
        .add_comment(auth.user_id, post_id, CommentRequest { text: dto.text })
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/edit_comment/{comment_id}/",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentInputDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found on this post"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(dto): Json<CommentInputDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .comment_service
        .update_comment(
            auth.user_id,
            post_id,
            comment_id,
            CommentRequest { text: dto.text },
        )
        .await?;
    Ok((StatusCode::OK, Json(comment.into())))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/delete_comment/{comment_id}/",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found on this post"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    state
        .comment_service
        .delete_comment(auth.user_id, post_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
