use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::application::services::PipelineOptions;

/// Service configuration, read from unprefixed environment variables
/// (`PORT`, `AUDIO_LIST_URL`, `INFERENCE_URL`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub audio_list_url: String,
    pub inference_url: String,
    pub result_url: String,
    pub download_dir: String,
    pub processed_file: String,
    pub persist_downloads: bool,
    pub request_timeout_secs: u64,
    pub inference_timeout_secs: u64,
    pub max_concurrent_artifacts: usize,
    #[serde(default)]
    pub run_deadline_secs: Option<u64>,
    pub log_format: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::default())
    }

    /// Same as [`Settings::load`] but reads variables from `vars` instead of the process.
    pub fn from_source(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::default().source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", 5009)?
            .set_default("audio_list_url", "http://localhost:3001/queue")?
            .set_default("inference_url", "http://localhost:5000/infer")?
            .set_default("result_url", "http://localhost:3001/inference-result")?
            .set_default("download_dir", "/tmp/audio_files")?
            .set_default("processed_file", "/tmp/processed_files.txt")?
            .set_default("persist_downloads", true)?
            .set_default("request_timeout_secs", 30)?
            .set_default("inference_timeout_secs", 120)?
            .set_default("max_concurrent_artifacts", 1)?
            .set_default("log_format", "text")?
            .add_source(environment.try_parsing(true).ignore_empty(true))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_concurrency: self.max_concurrent_artifacts.max(1),
            run_deadline: self.run_deadline_secs.map(Duration::from_secs),
        }
    }
}
