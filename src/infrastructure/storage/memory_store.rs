use std::collections::HashMap;
use std::io;

use bytes::Bytes;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use tokio::sync::Mutex;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

#[derive(Default)]
pub struct InMemoryStagingStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait::async_trait]
impl StagingStore for InMemoryStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let chunks: Vec<Bytes> = stream.try_collect().await?;
        let data = chunks.concat();
        let size = data.len() as u64;
        self.objects
            .lock()
            .await
            .insert(path.as_str().to_string(), data);
        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StagingStoreError> {
        self.objects
            .lock()
            .await
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| StagingStoreError::NotFound(path.to_string()))
    }
}
