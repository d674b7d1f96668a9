use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::application::ports::{DedupStore, DedupStoreError};
use crate::domain::ArtifactId;

/// Line-per-identifier append log, mirrored in memory for O(1) lookups.
///
/// Plain identifiers are written verbatim. Identifiers that would not survive a
/// trimmed line read (surrounding whitespace, control characters, empty, or a
/// leading quote) are written as a JSON string literal instead.
pub struct FileDedupStore {
    path: PathBuf,
    state: Mutex<DedupState>,
}

struct DedupState {
    processed: HashSet<String>,
    // Set when the file on disk does not end with a line break.
    needs_separator: bool,
}

impl FileDedupStore {
    /// Loads the log at `path`. An unreadable log is treated as empty so the
    /// service can still start; write failures are reported later by `add`.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => DedupState {
                processed: contents.lines().filter_map(decode_line).collect(),
                needs_separator: !contents.is_empty() && !contents.ends_with('\n'),
            },
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    tracing::info!(path = %path.display(), "No dedup log yet, starting empty");
                } else {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Dedup log unreadable, starting empty"
                    );
                }
                DedupState {
                    processed: HashSet::new(),
                    needs_separator: false,
                }
            }
        };

        tracing::info!(
            path = %path.display(),
            entries = state.processed.len(),
            "Dedup store loaded"
        );

        Self {
            path,
            state: Mutex::new(state),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.processed.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn append_line(&self, line: &str, needs_separator: bool) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut record = String::with_capacity(line.len() + 2);
        if needs_separator {
            record.push('\n');
        }
        record.push_str(line);
        record.push('\n');

        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await
    }
}

#[async_trait]
impl DedupStore for FileDedupStore {
    async fn contains(&self, id: &ArtifactId) -> bool {
        self.state.lock().await.processed.contains(id.as_str())
    }

    async fn add(&self, id: &ArtifactId) -> Result<(), DedupStoreError> {
        let value = id.as_str();

        // Held across the durable write so appends never interleave.
        let mut state = self.state.lock().await;
        if state.processed.contains(value) {
            return Ok(());
        }

        self.append_line(&encode_line(value), state.needs_separator)
            .await
            .map_err(|e| {
                DedupStoreError::Persistence(format!("{}: {}", self.path.display(), e))
            })?;

        state.needs_separator = false;
        state.processed.insert(value.to_string());
        tracing::debug!(path = %self.path.display(), "Identifier recorded");
        Ok(())
    }
}

fn needs_escaping(id: &str) -> bool {
    id.is_empty() || id.starts_with('"') || id.trim() != id || id.contains(char::is_control)
}

fn encode_line(id: &str) -> String {
    if needs_escaping(id) {
        serde_json::Value::String(id.to_string()).to_string()
    } else {
        id.to_string()
    }
}

fn decode_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Hand-written lines that merely start with a quote are kept as-is.
    if line.starts_with('"') {
        if let Ok(id) = serde_json::from_str::<String>(line) {
            return Some(id);
        }
    }

    Some(line.to_string())
}
