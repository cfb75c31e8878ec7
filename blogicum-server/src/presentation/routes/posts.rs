use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::comments::{add_comment, delete_comment, update_comment};
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, update_post, upload_image,
};

/// Every mutation is a POST to its own path.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/posts/create/", post(create_post))
        .route("/posts/{id}/", get(get_post))
        .route("/posts/{id}/edit/", post(update_post))
        .route("/posts/{id}/delete/", post(delete_post))
        .route("/posts/{id}/image/", post(upload_image))
        .route("/posts/{id}/comment/", post(add_comment))
        .route(
            "/posts/{id}/edit_comment/{comment_id}/",
            post(update_comment),
        )
        .route(
            "/posts/{id}/delete_comment/{comment_id}/",
            post(delete_comment),
        )
}
