pub mod dedup;
pub mod http;
pub mod observability;
mod pipeline_factory;
pub mod storage;

pub use pipeline_factory::{PipelineFactory, PipelineFactoryError};
