use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::http_client::{describe, error_body};
use crate::application::ports::{QueueClient, QueueClientError};
use crate::domain::ArtifactDescriptor;
use crate::infrastructure::observability::sanitize_url;

pub struct HttpQueueClient {
    client: Client,
    queue_url: String,
}

impl HttpQueueClient {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

/// Queue entries are either bare URLs or objects carrying `downloadUrl`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QueueEntry {
    Url(String),
    Detailed {
        #[serde(rename = "downloadUrl")]
        download_url: String,
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        filename: Option<String>,
    },
}

impl QueueEntry {
    fn into_descriptor(self) -> ArtifactDescriptor {
        match self {
            QueueEntry::Url(url) => ArtifactDescriptor::from_location(url),
            QueueEntry::Detailed {
                download_url,
                id,
                filename,
            } => {
                let id = match id {
                    Some(Value::String(s)) => Some(s),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    _ => None,
                };
                ArtifactDescriptor::new(download_url, id, filename)
            }
        }
    }
}

/// Parses a queue response body. A blank body is an empty queue.
pub fn parse_queue_body(body: &str) -> Result<Vec<ArtifactDescriptor>, QueueClientError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<QueueEntry> =
        serde_json::from_str(body).map_err(|e| QueueClientError::Protocol(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(QueueEntry::into_descriptor)
        .collect())
}

#[async_trait]
impl QueueClient for HttpQueueClient {
    async fn fetch_queue(&self) -> Result<Vec<ArtifactDescriptor>, QueueClientError> {
        tracing::debug!(url = %sanitize_url(&self.queue_url), "Polling upload queue");

        let response = self
            .client
            .get(&self.queue_url)
            .send()
            .await
            .map_err(|e| QueueClientError::Transport(describe(&e)))?;

        if !response.status().is_success() {
            return Err(QueueClientError::Transport(error_body(response).await));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QueueClientError::Transport(format!("body: {}", describe(&e))))?;

        let descriptors = parse_queue_body(&body)?;
        if descriptors.is_empty() {
            tracing::info!("No queued audio files");
        }
        Ok(descriptors)
    }
}
