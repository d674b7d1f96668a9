use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured value returned by the inference backend. Relayed without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InferenceResult(Value);

impl InferenceResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parses a response body as JSON, keeping non-JSON bodies as a plain string.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => Self(value),
            Err(_) => Self(Value::String(body.trim().to_string())),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `Some(true)` when the backend labelled the clip as human speech.
    pub fn is_human(&self) -> Option<bool> {
        self.0
            .get("prediction")
            .and_then(Value::as_str)
            .map(|p| p.eq_ignore_ascii_case("human"))
    }
}
