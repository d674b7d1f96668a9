use std::fmt;

use uuid::Uuid;

use super::ArtifactDescriptor;

/// Relative location of a downloaded artifact inside the download directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// Deterministic per identifier, so a retried download lands on the same path.
    pub fn for_artifact(descriptor: &ArtifactDescriptor) -> Self {
        let key = Uuid::new_v5(
            &Uuid::NAMESPACE_URL,
            descriptor.identifier.as_str().as_bytes(),
        );
        Self(format!("{}/{}", key, descriptor.filename))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
