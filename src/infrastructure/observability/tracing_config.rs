use crate::presentation::config::Settings;

const DEFAULT_FILTER: &str = "info,audio_mediator=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            json_format: settings.log_format.eq_ignore_ascii_case("json"),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
