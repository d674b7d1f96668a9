use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, WriteMultipart};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Download directory on the local filesystem.
pub struct LocalStagingStore {
    root: PathBuf,
    inner: LocalFileSystem,
}

impl LocalStagingStore {
    /// Creates `root` if it does not exist yet.
    pub fn new(root: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&root)?;
        let inner = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| StagingStoreError::WriteFailed(e.to_string()))?;
        Ok(Self { root, inner })
    }

    /// Absolute location of `path` on disk.
    pub fn resolve(&self, path: &StoragePath) -> PathBuf {
        self.root.join(path.as_str())
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let location = StorePath::from(path.as_str());
        let upload = self
            .inner
            .put_multipart(&location)
            .await
            .map_err(|e| StagingStoreError::WriteFailed(e.to_string()))?;
        let mut writer = WriteMultipart::new(upload);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    written += bytes.len() as u64;
                    writer.write(&bytes);
                }
                Err(e) => {
                    if let Err(abort_err) = writer.abort().await {
                        tracing::warn!(error = %abort_err, path = %path, "Failed to abort partial write");
                    }
                    return Err(StagingStoreError::Io(e));
                }
            }
        }

        writer
            .finish()
            .await
            .map_err(|e| StagingStoreError::WriteFailed(e.to_string()))?;

        Ok(written)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StagingStoreError> {
        let location = StorePath::from(path.as_str());
        let result = self.inner.get(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StagingStoreError::NotFound(path.to_string()),
            other => StagingStoreError::ReadFailed(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| StagingStoreError::ReadFailed(e.to_string()))
    }
}
