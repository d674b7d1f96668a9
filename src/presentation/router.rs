use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, process_audio_handler};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/process-audio", get(process_audio_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
