use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::Instrument;

use crate::application::ports::{
    ArtifactFetcher, DedupStore, DedupStoreError, FetchError, InferenceClient, InferenceError,
    QueueClient, QueueClientError, RelayError, ResultRelay,
};
use crate::domain::{
    ALREADY_PROCESSED, ArtifactDescriptor, ArtifactId, ArtifactState, DUPLICATE_ENTRY,
    InferenceResult, OutcomeStatus, PipelineStage, ProcessingOutcome, RunReport,
};
use crate::infrastructure::observability::sanitize_url;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Upper bound on artifacts processed at the same time. Values below 1 are treated as 1.
    pub max_concurrency: usize,
    /// Whole-run deadline; artifacts still in flight when it passes fail with a timeout.
    pub run_deadline: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            run_deadline: None,
        }
    }
}

/// Orchestrates one pass over the upload queue: fetch, infer, relay, record.
pub struct PipelineService {
    queue_client: Arc<dyn QueueClient>,
    fetcher: Arc<dyn ArtifactFetcher>,
    inference_client: Arc<dyn InferenceClient>,
    relay: Arc<dyn ResultRelay>,
    dedup_store: Arc<dyn DedupStore>,
    options: PipelineOptions,
    run_guard: Mutex<()>,
}

enum PlannedEntry {
    Skip(ArtifactId, &'static str),
    Process(ArtifactDescriptor),
}

impl PipelineService {
    pub fn new(
        queue_client: Arc<dyn QueueClient>,
        fetcher: Arc<dyn ArtifactFetcher>,
        inference_client: Arc<dyn InferenceClient>,
        relay: Arc<dyn ResultRelay>,
        dedup_store: Arc<dyn DedupStore>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            queue_client,
            fetcher,
            inference_client,
            relay,
            dedup_store,
            options,
            run_guard: Mutex::new(()),
        }
    }

    /// Runs the pipeline once. Concurrent callers are serialized.
    ///
    /// Only a queue fetch failure aborts the run; every other failure is
    /// captured in the affected artifact's outcome.
    pub async fn run_once(&self) -> Result<RunReport, PipelineError> {
        let _guard = self.run_guard.lock().await;
        self.run_locked()
            .instrument(tracing::info_span!("pipeline_run"))
            .await
    }

    async fn run_locked(&self) -> Result<RunReport, PipelineError> {
        let started = Instant::now();

        let descriptors = self.queue_client.fetch_queue().await.map_err(|e| {
            tracing::error!(error = %e, "Queue fetch failed, aborting run");
            PipelineError::Queue(e)
        })?;

        tracing::info!(queued = descriptors.len(), "Fetched queue snapshot");

        let deadline = self.options.run_deadline.map(|d| started + d);
        let plan = self.plan(descriptors).await;

        let pending: Vec<_> = plan
            .into_iter()
            .map(|entry| self.outcome_for(entry, deadline))
            .collect();

        // `buffered` yields in input order, so the report follows the queue.
        let results: Vec<ProcessingOutcome> = stream::iter(pending)
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        let report = RunReport::from_outcomes(results);

        tracing::info!(
            processed = report.processed_count,
            succeeded = report.count(OutcomeStatus::Success),
            failed = report.count(OutcomeStatus::Error),
            skipped = report.count(OutcomeStatus::Skipped),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pipeline run completed"
        );

        Ok(report)
    }

    async fn plan(&self, descriptors: Vec<ArtifactDescriptor>) -> Vec<PlannedEntry> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        let mut plan = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if !seen.insert(descriptor.identifier.clone()) {
                tracing::warn!(
                    identifier = %sanitize_url(descriptor.identifier.as_str()),
                    state = %ArtifactState::Skipped,
                    "Duplicate queue entry"
                );
                plan.push(PlannedEntry::Skip(descriptor.identifier, DUPLICATE_ENTRY));
            } else if self.dedup_store.contains(&descriptor.identifier).await {
                tracing::info!(
                    identifier = %sanitize_url(descriptor.identifier.as_str()),
                    state = %ArtifactState::Skipped,
                    "Already processed"
                );
                plan.push(PlannedEntry::Skip(descriptor.identifier, ALREADY_PROCESSED));
            } else {
                plan.push(PlannedEntry::Process(descriptor));
            }
        }

        plan
    }

    async fn outcome_for(
        &self,
        entry: PlannedEntry,
        deadline: Option<Instant>,
    ) -> ProcessingOutcome {
        match entry {
            PlannedEntry::Skip(id, reason) => ProcessingOutcome::skipped(id, reason),
            PlannedEntry::Process(descriptor) => self.process_artifact(descriptor, deadline).await,
        }
    }

    async fn process_artifact(
        &self,
        descriptor: ArtifactDescriptor,
        deadline: Option<Instant>,
    ) -> ProcessingOutcome {
        let span = tracing::info_span!(
            "artifact",
            identifier = %sanitize_url(descriptor.identifier.as_str()),
            filename = %descriptor.filename,
        );

        async move {
            let result = match self.deliver_within(&descriptor, deadline).await {
                Ok(inference) => self.record(&descriptor, inference).await,
                Err(failure) => Err(failure),
            };

            match result {
                Ok(inference) => {
                    tracing::info!("Artifact processed");
                    ProcessingOutcome::success(descriptor.identifier, inference)
                }
                Err(failure) => {
                    transition(ArtifactState::Failed);
                    tracing::warn!(stage = %failure.stage(), error = %failure, "Artifact failed");
                    ProcessingOutcome::error(
                        descriptor.identifier,
                        failure.stage(),
                        failure.to_string(),
                    )
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn deliver_within(
        &self,
        descriptor: &ArtifactDescriptor,
        deadline: Option<Instant>,
    ) -> Result<InferenceResult, ArtifactFailure> {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, self.deliver(descriptor))
                .await
                .unwrap_or(Err(ArtifactFailure::Timeout)),
            None => self.deliver(descriptor).await,
        }
    }

    /// Pending -> Fetched -> Inferred -> Relayed. The first failing stage ends the artifact.
    async fn deliver(
        &self,
        descriptor: &ArtifactDescriptor,
    ) -> Result<InferenceResult, ArtifactFailure> {
        transition(ArtifactState::Pending);

        let audio = self
            .fetcher
            .fetch(descriptor)
            .await
            .map_err(ArtifactFailure::Fetch)?;
        tracing::debug!(bytes = audio.len(), "Artifact downloaded");
        transition(ArtifactState::Fetched);

        let inference = self
            .inference_client
            .infer(&descriptor.filename, &audio)
            .await
            .map_err(ArtifactFailure::Inference)?;
        transition(ArtifactState::Inferred);

        self.relay
            .relay(descriptor, &inference)
            .await
            .map_err(ArtifactFailure::Relay)?;
        transition(ArtifactState::Relayed);

        Ok(inference)
    }

    // Runs outside the run deadline: a relayed result must not be cancelled mid-write.
    async fn record(
        &self,
        descriptor: &ArtifactDescriptor,
        inference: InferenceResult,
    ) -> Result<InferenceResult, ArtifactFailure> {
        self.dedup_store
            .add(&descriptor.identifier)
            .await
            .map_err(ArtifactFailure::Record)?;
        transition(ArtifactState::Recorded);
        Ok(inference)
    }
}

fn transition(state: ArtifactState) {
    tracing::debug!(state = %state, "Artifact state transition");
}

/// Failure that aborts a whole run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("queue: {0}")]
    Queue(#[from] QueueClientError),
}

/// Failure isolated to a single artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactFailure {
    #[error("fetch failed: {0}")]
    Fetch(FetchError),
    #[error("inference failed: {0}")]
    Inference(InferenceError),
    #[error("relay failed: {0}")]
    Relay(RelayError),
    #[error("record failed: {0}")]
    Record(DedupStoreError),
    #[error("deadline failed: run deadline exceeded")]
    Timeout,
}

impl ArtifactFailure {
    pub fn stage(&self) -> PipelineStage {
        match self {
            ArtifactFailure::Fetch(_) => PipelineStage::Fetch,
            ArtifactFailure::Inference(_) => PipelineStage::Inference,
            ArtifactFailure::Relay(_) => PipelineStage::Relay,
            ArtifactFailure::Record(_) => PipelineStage::Record,
            ArtifactFailure::Timeout => PipelineStage::Deadline,
        }
    }
}
