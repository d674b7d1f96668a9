mod artifact;
mod artifact_state;
mod inference_result;
mod outcome;
mod storage_path;

pub use artifact::{ArtifactDescriptor, ArtifactId, filename_from_location};
pub use artifact_state::{ArtifactState, PipelineStage};
pub use inference_result::InferenceResult;
pub use outcome::{
    ALREADY_PROCESSED, DUPLICATE_ENTRY, OutcomeStatus, ProcessingOutcome, RunReport,
};
pub use storage_path::StoragePath;
