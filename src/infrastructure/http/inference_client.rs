use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart;

use super::http_client::{describe, error_body};
use crate::application::ports::{InferenceClient, InferenceError};
use crate::domain::InferenceResult;

const AUDIO_MIME: &str = "audio/wav";

pub struct HttpInferenceClient {
    client: Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn infer(
        &self,
        filename: &str,
        audio_data: &[u8],
    ) -> Result<InferenceResult, InferenceError> {
        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name(filename.to_string())
            .mime_str(AUDIO_MIME)
            .map_err(|e| InferenceError::RequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new().part("file", file_part);

        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = audio_data.len(),
            "Sending audio to inference backend"
        );
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InferenceError::RequestFailed(describe(&e)))?;

        if !response.status().is_success() {
            return Err(InferenceError::Rejected(error_body(response).await));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::RequestFailed(format!("body: {}", describe(&e))))?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Inference completed"
        );

        Ok(InferenceResult::from_body(&body))
    }
}
