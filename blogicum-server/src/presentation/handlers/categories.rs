use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{PageQuery, PostPageDto};
use crate::domain::catalog::Category;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            description: category.description,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryPostsDto {
    pub(crate) category: CategoryDto,
    pub(crate) posts: PostPageDto,
}

#[utoipa::path(
    get,
    path = "/category/{slug}/",
    tag = "categories",
    params(
        ("slug" = String, Path, description = "Category slug"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Category with its visible posts", body = CategoryPostsDto),
        (status = 404, description = "Category missing or hidden"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn category_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<CategoryPostsDto>)> {
    let result = state
        .blog_service
        .category_posts(&slug, query.page_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(CategoryPostsDto {
            category: result.category.into(),
            posts: result.posts.into(),
        }),
    ))
}
