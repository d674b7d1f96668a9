use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;

use super::http_client::{describe, error_body};
use crate::application::ports::{ArtifactFetcher, FetchError, StagingStore, StagingStoreError};
use crate::domain::{ArtifactDescriptor, StoragePath};
use crate::infrastructure::observability::sanitize_url;

/// Downloads artifacts over HTTP, optionally staging them under the download directory.
pub struct HttpArtifactFetcher {
    client: Client,
    staging_store: Option<Arc<dyn StagingStore>>,
}

impl HttpArtifactFetcher {
    pub fn new(client: Client, staging_store: Option<Arc<dyn StagingStore>>) -> Self {
        Self {
            client,
            staging_store,
        }
    }

    async fn stage(
        &self,
        store: &dyn StagingStore,
        descriptor: &ArtifactDescriptor,
        response: reqwest::Response,
    ) -> Result<Vec<u8>, FetchError> {
        let path = StoragePath::for_artifact(descriptor);
        let body = response.bytes_stream().map_err(io::Error::other).boxed();

        let written = store.store(&path, body).await.map_err(|e| match e {
            // Io only surfaces from the body stream, i.e. the download itself broke.
            StagingStoreError::Io(e) => FetchError::Download(format!("body: {}", e)),
            other => FetchError::Storage(other.to_string()),
        })?;

        tracing::debug!(path = %path, bytes = written, "Artifact staged");

        store
            .fetch(&path)
            .await
            .map_err(|e| FetchError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, descriptor: &ArtifactDescriptor) -> Result<Vec<u8>, FetchError> {
        tracing::info!(
            url = %sanitize_url(&descriptor.location),
            filename = %descriptor.filename,
            "Downloading artifact"
        );

        let response = self
            .client
            .get(&descriptor.location)
            .send()
            .await
            .map_err(|e| FetchError::Download(describe(&e)))?;

        if !response.status().is_success() {
            return Err(FetchError::Download(error_body(response).await));
        }

        match &self.staging_store {
            Some(store) => self.stage(store.as_ref(), descriptor, response).await,
            None => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| FetchError::Download(format!("body: {}", describe(&e)))),
        }
    }
}
