mod artifact_fetcher;
mod dedup_store;
mod inference_client;
mod queue_client;
mod result_relay;
mod staging_store;

pub use artifact_fetcher::{ArtifactFetcher, FetchError};
pub use dedup_store::{DedupStore, DedupStoreError};
pub use inference_client::{InferenceClient, InferenceError};
pub use queue_client::{QueueClient, QueueClientError};
pub use result_relay::{RelayError, ResultRelay};
pub use staging_store::{StagingStore, StagingStoreError};
