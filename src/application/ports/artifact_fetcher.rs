use async_trait::async_trait;

use crate::domain::ArtifactDescriptor;

#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, descriptor: &ArtifactDescriptor) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Download(String),
    #[error("storage failed: {0}")]
    Storage(String),
}
