use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::comments::CommentDto;
use super::{PageQuery, PostDto, PostPageDto};
use crate::application::blog_service::ImageUpload;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::{AuthenticatedUser, CurrentViewer};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 256))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) text: String,
    /// Defaults to the time of the request.
    pub(crate) pub_date: Option<DateTime<Utc>>,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: Option<bool>,
}

/// The edit replaces the post's fields. An omitted `category_id` or
/// `location_id` clears it, which takes the post off public listings;
/// only `pub_date` is kept when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 256))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) text: String,
    /// Keeps the stored value when omitted.
    pub(crate) pub_date: Option<DateTime<Utc>>,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) post: PostDto,
    pub(crate) comments: Vec<CommentDto>,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub(crate) struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub(crate) image: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Published posts, newest first", body = PostPageDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<PostPageDto>)> {
    let page = state.blog_service.list_posts(query.page_request()).await?;

    Ok((StatusCode::OK, Json(PostPageDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/posts/{id}/",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with its comments", body = PostDetailDto),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "Post not found or not visible"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let post = state.blog_service.get_post(viewer, id).await?;
    let comments = state.comment_service.comments_for(&post).await?;

    Ok((
        StatusCode::OK,
        Json(PostDetailDto {
            post: post.into(),
            comments: comments.into_iter().map(CommentDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/posts/create/",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category or location not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        text: dto.text,
        pub_date: dto.pub_date,
        category_id: dto.category_id,
        location_id: dto.location_id,
        is_published: dto.is_published.unwrap_or(true),
    };

    let result = state.blog_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/edit/",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post, category or location not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = UpdatePostRequest {
        title: dto.title,
        text: dto.text,
        pub_date: dto.pub_date,
        category_id: dto.category_id,
        location_id: dto.location_id,
        is_published: dto.is_published.unwrap_or(true),
    };

    let result = state
        .blog_service
        .update_post(auth.user_id, id, req)
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/delete/",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post and its comments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.blog_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/posts/{id}/image/",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image attached", body = PostDto),
        (status = 400, description = "Missing or unsupported image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 413, description = "Body too large"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upload_image(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let upload = read_image_field(multipart).await?;

    let result = state
        .blog_service
        .attach_image(auth.user_id, id, upload)
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

async fn read_image_field(mut multipart: Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("image field must be a file".to_string()))?;
        let bytes = field.bytes().await?;

        return Ok(ImageUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::BadRequest(format!(
        "multipart field `{IMAGE_FIELD}` is required"
    )))
}
