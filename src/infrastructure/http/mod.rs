mod artifact_fetcher;
mod http_client;
mod inference_client;
mod queue_client;
mod result_relay;

pub use artifact_fetcher::HttpArtifactFetcher;
pub use http_client::build_http_client;
pub use inference_client::HttpInferenceClient;
pub use queue_client::{HttpQueueClient, parse_queue_body};
pub use result_relay::HttpResultRelay;
