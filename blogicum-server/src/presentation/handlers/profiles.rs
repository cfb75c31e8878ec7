use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{PageQuery, PostPageDto};
use crate::domain::user::{UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::{AuthenticatedUser, CurrentViewer};

/// Public part of an account; the email stays private.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for ProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

/// The account as its owner sees it, email included.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AccountDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for AccountDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfilePageDto {
    pub(crate) profile: ProfileDto,
    pub(crate) posts: PostPageDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub(crate) first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub(crate) last_name: String,
}

#[utoipa::path(
    get,
    path = "/profile/{username}/",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Username"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Profile with posts; the owner also sees drafts and scheduled posts", body = ProfilePageDto),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn profile(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ProfilePageDto>)> {
    let result = state
        .profile_service
        .profile(viewer, &username, query.page_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ProfilePageDto {
            profile: result.user.into(),
            posts: result.posts.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/profile/{username}/edit/",
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("username" = String, Path, description = "Current username of the caller")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = AccountDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(username): Path<String>,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<AccountDto>)> {
    dto.validate()?;
    let req = UpdateProfileRequest {
        username: dto.username,
        email: dto.email,
        first_name: dto.first_name,
        last_name: dto.last_name,
    };

    let user = state
        .profile_service
        .update_profile(auth.user_id, &username, req)
        .await?;
    Ok((StatusCode::OK, Json(user.into())))
}
