pub mod health;
pub mod parse;

pub use health::*;
pub use parse::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, request_id_middleware};
use crate::state::AppState;

/// Room for boundaries and part headers around the uploaded file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Builds the application router shared by the Lambda and server runtimes.
pub fn create_router(state: AppState) -> Router {
    let max_bytes = state.config.max_file_size_bytes();

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        // Inline documents travel base64 encoded inside JSON.
        .route(
            "/parser",
            post(parse_handler).layer(DefaultBodyLimit::max(max_bytes * 2)),
        )
        .route("/parser/sample", get(sample_handler))
        .route(
            "/parser/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(max_bytes + MULTIPART_OVERHEAD)),
        )
        .route(
            "/parser/binary",
            post(binary_handler).layer(DefaultBodyLimit::max(max_bytes)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .with_state(state)
}
