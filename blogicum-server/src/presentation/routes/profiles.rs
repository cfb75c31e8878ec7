use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::profiles::{profile, update_profile};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/{username}/", get(profile))
        .route("/profile/{username}/edit/", post(update_profile))
}
