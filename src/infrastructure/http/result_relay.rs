use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::http_client::{describe, error_body};
use crate::application::ports::{RelayError, ResultRelay};
use crate::domain::{ArtifactDescriptor, InferenceResult};

pub struct HttpResultRelay {
    client: Client,
    result_url: String,
}

impl HttpResultRelay {
    pub fn new(client: Client, result_url: impl Into<String>) -> Self {
        Self {
            client,
            result_url: result_url.into(),
        }
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    identifier: &'a str,
    filename: &'a str,
    inference_result: &'a InferenceResult,
    #[serde(rename = "isHuman", skip_serializing_if = "Option::is_none")]
    is_human: Option<bool>,
}

#[async_trait]
impl ResultRelay for HttpResultRelay {
    async fn relay(
        &self,
        descriptor: &ArtifactDescriptor,
        result: &InferenceResult,
    ) -> Result<(), RelayError> {
        let payload = RelayPayload {
            identifier: descriptor.identifier.as_str(),
            filename: &descriptor.filename,
            inference_result: result,
            is_human: result.is_human(),
        };

        tracing::debug!(
            filename = %descriptor.filename,
            is_human = ?payload.is_human,
            "Relaying inference result"
        );

        let response = self
            .client
            .post(&self.result_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::RequestFailed(describe(&e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Rejected(error_body(response).await));
        }

        Ok(())
    }
}
