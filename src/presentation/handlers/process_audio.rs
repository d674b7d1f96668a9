use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Runs the pipeline once and returns the run report.
#[tracing::instrument(skip(state))]
pub async fn process_audio_handler(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Received request to process audio files");

    match state.pipeline.run_once().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Pipeline run failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
