use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::profiles::AccountDto;
use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

impl From<RegisterDto> for RegisterRequest {
    fn from(dto: RegisterDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

impl From<LoginDto> for LoginRequest {
    fn from(dto: LoginDto) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
        }
    }
}

/// Bearer token for `Authorization` plus the account it was issued to.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenDto {
    pub(crate) access_token: String,
    pub(crate) user: AccountDto,
}

impl From<AuthResult> for TokenDto {
    fn from(result: AuthResult) -> Self {
        Self {
            access_token: result.access_token,
            user: result.user.into(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/register/",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created and signed in", body = TokenDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    dto.validate()?;
    let issued = state.auth_service.register(dto.into()).await?;

    Ok((StatusCode::CREATED, Json(issued.into())))
}

#[utoipa::path(
    post,
    path = "/auth/login/",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = TokenDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    dto.validate()?;
    let issued = state.auth_service.login(dto.into()).await?;

    Ok((StatusCode::OK, Json(issued.into())))
}
