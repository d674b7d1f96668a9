use serde::Serialize;

use super::{ArtifactId, InferenceResult, PipelineStage};

pub const ALREADY_PROCESSED: &str = "already processed";
pub const DUPLICATE_ENTRY: &str = "duplicate queue entry";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
    Skipped,
}

/// Result of handling one descriptor. Constructors keep the status/payload pairing consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingOutcome {
    #[serde(rename = "url", serialize_with = "serialize_id")]
    pub identifier: ArtifactId,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_result: Option<InferenceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn serialize_id<S: serde::Serializer>(id: &ArtifactId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(id.as_str())
}

impl ProcessingOutcome {
    pub fn success(identifier: ArtifactId, result: InferenceResult) -> Self {
        Self {
            identifier,
            status: OutcomeStatus::Success,
            stage: None,
            inference_result: Some(result),
            message: None,
        }
    }

    pub fn error(identifier: ArtifactId, stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            identifier,
            status: OutcomeStatus::Error,
            stage: Some(stage),
            inference_result: None,
            message: Some(message.into()),
        }
    }

    pub fn skipped(identifier: ArtifactId, message: impl Into<String>) -> Self {
        Self {
            identifier,
            status: OutcomeStatus::Skipped,
            stage: None,
            inference_result: None,
            message: Some(message.into()),
        }
    }
}

/// Aggregate of one pipeline run, in queue order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    #[serde(rename = "processed_files")]
    pub processed_count: usize,
    pub results: Vec<ProcessingOutcome>,
}

impl RunReport {
    pub fn empty() -> Self {
        Self {
            processed_count: 0,
            results: Vec::new(),
        }
    }

    /// Counts every non-skipped outcome as processed.
    pub fn from_outcomes(results: Vec<ProcessingOutcome>) -> Self {
        let processed_count = results
            .iter()
            .filter(|o| o.status != OutcomeStatus::Skipped)
            .count();
        Self {
            processed_count,
            results,
        }
    }

    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.results.iter().filter(|o| o.status == status).count()
    }
}
