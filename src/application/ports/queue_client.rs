use async_trait::async_trait;

use crate::domain::ArtifactDescriptor;

#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn fetch_queue(&self) -> Result<Vec<ArtifactDescriptor>, QueueClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueClientError {
    #[error("malformed queue response: {0}")]
    Protocol(String),
    #[error("queue request failed: {0}")]
    Transport(String),
}
