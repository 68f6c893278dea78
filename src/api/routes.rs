//! Route table

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api::handlers;
use crate::response::file::URL_PREFIX;
use crate::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(state.assets.root());

    Router::new()
        .route("/", get(handlers::health))
        .route("/api/generate", post(handlers::generate_image))
        .route("/api/generate-video", post(handlers::generate_video))
        .route("/api/library", get(handlers::library))
        .nest_service(URL_PREFIX, assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
