use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_session_handler, download_handler, generate_handler, get_session_handler,
    health_handler, index_handler, regenerate_handler, upload_document_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state.settings.server.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/sessions", post(create_session_handler))
        .route("/api/v1/sessions/{id}", get(get_session_handler))
        .route(
            "/api/v1/sessions/{id}/document",
            post(upload_document_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/sessions/{id}/generate", post(generate_handler))
        .route("/api/v1/sessions/{id}/regenerate", post(regenerate_handler))
        .route(
            "/api/v1/sessions/{id}/download/{format}",
            get(download_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
