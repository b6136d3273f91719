pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};

use crate::format::handlers;
use crate::state::AppState;

/// Uploads are capped at 16 MiB.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(handlers::show_upload_form).post(handlers::handle_format),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
