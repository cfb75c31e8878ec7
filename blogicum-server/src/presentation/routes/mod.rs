use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod profiles;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(posts::router())
        .merge(categories::router())
        .merge(profiles::router())
}
