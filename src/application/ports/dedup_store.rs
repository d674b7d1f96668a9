use async_trait::async_trait;

use crate::domain::ArtifactId;

/// Durable set of identifiers whose artifacts completed successfully.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Membership check. Never fails.
    async fn contains(&self, id: &ArtifactId) -> bool;

    /// Records `id` and makes it durable before returning.
    async fn add(&self, id: &ArtifactId) -> Result<(), DedupStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DedupStoreError {
    #[error("persistence failed: {0}")]
    Persistence(String),
}
