use axum::{Json, Router, middleware, routing::get};
use serde::Serialize;

use super::app_error::AppError;
use super::middleware::auth::viewer_middleware;
use super::{AppState, routes};

/// Application routes behind the viewer middleware, plus the health probe.
pub(crate) fn routes(state: AppState) -> Router {
    let api = routes::router().layer(middleware::from_fn_with_state(
        state.clone(),
        viewer_middleware,
    ));

    Router::new()
        .route("/healthz", get(health_handler))
        .merge(api)
        .fallback(fallback_handler)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn fallback_handler() -> AppError {
    AppError::NotFound
}
