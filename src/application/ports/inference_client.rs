use async_trait::async_trait;

use crate::domain::InferenceResult;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(
        &self,
        filename: &str,
        audio_data: &[u8],
    ) -> Result<InferenceResult, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    RequestFailed(String),
    #[error("inference rejected: {0}")]
    Rejected(String),
}
