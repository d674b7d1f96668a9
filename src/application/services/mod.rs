mod pipeline_service;

pub use pipeline_service::{ArtifactFailure, PipelineError, PipelineOptions, PipelineService};
