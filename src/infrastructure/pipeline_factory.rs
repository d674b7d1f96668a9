use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::application::services::PipelineService;
use crate::presentation::config::Settings;

use super::dedup::FileDedupStore;
use super::http::{
    HttpArtifactFetcher, HttpInferenceClient, HttpQueueClient, HttpResultRelay,
    build_http_client,
};
use super::storage::LocalStagingStore;

pub struct PipelineFactory;

impl PipelineFactory {
    /// Wires the HTTP adapters, download staging and the file-backed dedup store.
    pub async fn create(settings: &Settings) -> Result<PipelineService, PipelineFactoryError> {
        let client = build_http_client(settings.request_timeout())?;
        let inference_http = build_http_client(settings.inference_timeout())?;

        let staging_store: Option<Arc<dyn StagingStore>> = if settings.persist_downloads {
            let store = LocalStagingStore::new(PathBuf::from(&settings.download_dir))?;
            Some(Arc::new(store))
        } else {
            None
        };

        let dedup_store = FileDedupStore::open(&settings.processed_file).await;

        Ok(PipelineService::new(
            Arc::new(HttpQueueClient::new(
                client.clone(),
                &settings.audio_list_url,
            )),
            Arc::new(HttpArtifactFetcher::new(client.clone(), staging_store)),
            Arc::new(HttpInferenceClient::new(
                inference_http,
                &settings.inference_url,
            )),
            Arc::new(HttpResultRelay::new(client, &settings.result_url)),
            Arc::new(dedup_store),
            settings.pipeline_options(),
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineFactoryError {
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("download directory: {0}")]
    Staging(#[from] StagingStoreError),
}
