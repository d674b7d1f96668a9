use std::fmt;

/// Per-artifact lifecycle inside one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactState {
    Pending,
    Fetched,
    Inferred,
    Relayed,
    Recorded,
    Skipped,
    Failed,
}

impl ArtifactState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Pending => "PENDING",
            ArtifactState::Fetched => "FETCHED",
            ArtifactState::Inferred => "INFERRED",
            ArtifactState::Relayed => "RELAYED",
            ArtifactState::Recorded => "RECORDED",
            ArtifactState::Skipped => "SKIPPED",
            ArtifactState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Step of the per-artifact pipeline, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Fetch,
    Inference,
    Relay,
    Record,
    Deadline,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Fetch => "fetch",
            PipelineStage::Inference => "inference",
            PipelineStage::Relay => "relay",
            PipelineStage::Record => "record",
            PipelineStage::Deadline => "deadline",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
