use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = match state.config.max_upload_size {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(
            "/customizations",
            get(handlers::list_customizations)
                .post(handlers::create_customization)
                .layer(body_limit),
        )
        .route("/customizations/:id", get(handlers::get_customization))
        // Uploaded pictures
        .route("/uploads/*name", get(handlers::serve_upload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
