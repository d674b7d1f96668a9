use std::time::Duration;

use reqwest::Client;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared client whose every request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .user_agent(USER_AGENT)
        .build()
}

/// Reads a failed response body for error messages without masking the status.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    if body.trim().is_empty() {
        format!("status {}", status)
    } else {
        format!("status {}: {}", status, body.trim())
    }
}

pub(crate) fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
