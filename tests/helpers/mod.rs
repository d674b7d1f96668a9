use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use audio_mediator::application::ports::{
    ArtifactFetcher, DedupStore, DedupStoreError, FetchError, InferenceClient, InferenceError,
    QueueClient, QueueClientError, RelayError, ResultRelay,
};
use audio_mediator::application::services::{PipelineOptions, PipelineService};
use audio_mediator::domain::{ArtifactDescriptor, ArtifactId, InferenceResult};

pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

/// Address with nothing listening on it.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn descriptors(urls: &[&str]) -> Vec<ArtifactDescriptor> {
    urls.iter()
        .map(|u| ArtifactDescriptor::from_location(*u))
        .collect()
}

pub fn id(url: &str) -> ArtifactId {
    ArtifactId::new(url)
}

pub enum StubQueue {
    Entries(Vec<ArtifactDescriptor>),
    Fails,
}

#[async_trait]
impl QueueClient for StubQueue {
    async fn fetch_queue(&self) -> Result<Vec<ArtifactDescriptor>, QueueClientError> {
        match self {
            StubQueue::Entries(entries) => Ok(entries.clone()),
            StubQueue::Fails => Err(QueueClientError::Transport(
                "connection refused".to_string(),
            )),
        }
    }
}

#[derive(Default)]
pub struct StubFetcher {
    failing: Mutex<HashSet<String>>,
    slow: Mutex<HashSet<String>>,
    delays_ms: Mutex<Vec<(String, u64)>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn fail_for(&self, location: &str) {
        self.failing.lock().unwrap().insert(location.to_string());
    }

    /// Never completes in any reasonable test time.
    pub fn hang_for(&self, location: &str) {
        self.slow.lock().unwrap().insert(location.to_string());
    }

    pub fn delay_for(&self, location: &str, millis: u64) {
        self.delays_ms
            .lock()
            .unwrap()
            .push((location.to_string(), millis));
    }

    pub fn calls_for(&self, location: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == location)
            .count()
    }
}

#[async_trait]
impl ArtifactFetcher for StubFetcher {
    async fn fetch(&self, descriptor: &ArtifactDescriptor) -> Result<Vec<u8>, FetchError> {
        let location = descriptor.location.clone();
        self.calls.lock().unwrap().push(location.clone());

        let delay = self
            .delays_ms
            .lock()
            .unwrap()
            .iter()
            .find(|(l, _)| *l == location)
            .map(|(_, d)| *d);
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        let hangs = self.slow.lock().unwrap().contains(&location);
        if hangs {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        let fails = self.failing.lock().unwrap().contains(&location);
        if fails {
            return Err(FetchError::Download("status 404 Not Found".to_string()));
        }
        Ok(format!("audio:{}", location).into_bytes())
    }
}

#[derive(Default)]
pub struct StubInference {
    failing: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubInference {
    pub fn fail_for(&self, filename: &str) {
        self.failing.lock().unwrap().insert(filename.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }
}

#[async_trait]
impl InferenceClient for StubInference {
    async fn infer(
        &self,
        filename: &str,
        audio_data: &[u8],
    ) -> Result<InferenceResult, InferenceError> {
        self.calls.lock().unwrap().push(filename.to_string());
        if self.failing.lock().unwrap().contains(filename) {
            return Err(InferenceError::Rejected(
                "status 500 Internal Server Error".to_string(),
            ));
        }
        Ok(InferenceResult::new(serde_json::json!({
            "prediction": "human",
            "bytes": audio_data.len(),
        })))
    }
}

#[derive(Default)]
pub struct StubRelay {
    failing: Mutex<HashSet<String>>,
    pub relayed: Mutex<Vec<String>>,
}

impl StubRelay {
    pub fn fail_for(&self, identifier: &str) {
        self.failing.lock().unwrap().insert(identifier.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn relayed_count(&self, identifier: &str) -> usize {
        self.relayed
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == identifier)
            .count()
    }
}

#[async_trait]
impl ResultRelay for StubRelay {
    async fn relay(
        &self,
        descriptor: &ArtifactDescriptor,
        _result: &InferenceResult,
    ) -> Result<(), RelayError> {
        let identifier = descriptor.identifier.as_str().to_string();
        if self.failing.lock().unwrap().contains(&identifier) {
            return Err(RelayError::Rejected("status 503 Service Unavailable".to_string()));
        }
        self.relayed.lock().unwrap().push(identifier);
        Ok(())
    }
}

pub struct FailingDedupStore;

#[async_trait]
impl DedupStore for FailingDedupStore {
    async fn contains(&self, _id: &ArtifactId) -> bool {
        false
    }

    async fn add(&self, _id: &ArtifactId) -> Result<(), DedupStoreError> {
        Err(DedupStoreError::Persistence("disk full".to_string()))
    }
}

pub struct Harness {
    pub fetcher: Arc<StubFetcher>,
    pub inference: Arc<StubInference>,
    pub relay: Arc<StubRelay>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            fetcher: Arc::new(StubFetcher::default()),
            inference: Arc::new(StubInference::default()),
            relay: Arc::new(StubRelay::default()),
        }
    }

    pub fn pipeline(
        &self,
        queue: StubQueue,
        dedup_store: Arc<dyn DedupStore>,
        options: PipelineOptions,
    ) -> PipelineService {
        PipelineService::new(
            Arc::new(queue),
            self.fetcher.clone(),
            self.inference.clone(),
            self.relay.clone(),
            dedup_store,
            options,
        )
    }
}
