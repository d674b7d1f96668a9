use async_trait::async_trait;

use crate::domain::{ArtifactDescriptor, InferenceResult};

#[async_trait]
pub trait ResultRelay: Send + Sync {
    async fn relay(
        &self,
        descriptor: &ArtifactDescriptor,
        result: &InferenceResult,
    ) -> Result<(), RelayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    RequestFailed(String),
    #[error("relay rejected by uploader: {0}")]
    Rejected(String),
}
