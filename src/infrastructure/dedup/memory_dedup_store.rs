use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{DedupStore, DedupStoreError};
use crate::domain::ArtifactId;

/// Non-durable store for dry runs and tests.
#[derive(Default)]
pub struct InMemoryDedupStore {
    processed: Mutex<HashSet<ArtifactId>>,
}

impl InMemoryDedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(ids: impl IntoIterator<Item = ArtifactId>) -> Self {
        Self {
            processed: Mutex::new(ids.into_iter().collect()),
        }
    }

    pub async fn snapshot(&self) -> HashSet<ArtifactId> {
        self.processed.lock().await.clone()
    }
}

#[async_trait]
impl DedupStore for InMemoryDedupStore {
    async fn contains(&self, id: &ArtifactId) -> bool {
        self.processed.lock().await.contains(id)
    }

    async fn add(&self, id: &ArtifactId) -> Result<(), DedupStoreError> {
        self.processed.lock().await.insert(id.clone());
        Ok(())
    }
}
