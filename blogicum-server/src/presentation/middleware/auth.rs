use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domain::viewer::Viewer;
use crate::infrastructure::jwt::JwtService;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// The viewer resolved by [`viewer_middleware`]; anonymous when no token was sent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CurrentViewer(pub(crate) Viewer);

impl<S> FromRequestParts<S> for CurrentViewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentViewer(
            parts.extensions.get::<Viewer>().copied().unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Viewer>() {
            Some(Viewer::User(user_id)) => Ok(AuthenticatedUser { user_id: *user_id }),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Requests without `Authorization` are anonymous; a header that is present
/// but malformed or carries a bad token is rejected outright.
pub(crate) async fn viewer_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let viewer = resolve_viewer(request.headers(), &state.jwt)?;
    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}

pub(crate) fn resolve_viewer(headers: &HeaderMap, jwt: &JwtService) -> Result<Viewer, AppError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(Viewer::Anonymous);
    };
    let auth_header = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next().ok_or(AppError::Unauthorized)?;
    let token = parts.next().ok_or(AppError::Unauthorized)?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized);
    }

    let claims = jwt
        .verify_token(token)
        .map_err(|_| AppError::Unauthorized)?;

    Ok(Viewer::User(claims.user_id))
}
