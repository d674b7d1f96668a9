use std::fmt;

const FALLBACK_FILENAME: &str = "artifact.wav";

/// Dedup key of a queued artifact. Stable across repeated queue fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One queued audio artifact as reported by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub identifier: ArtifactId,
    pub location: String,
    pub filename: String,
}

impl ArtifactDescriptor {
    /// Builds a descriptor, using the location as identifier when no explicit id is given.
    pub fn new(location: impl Into<String>, id: Option<String>, filename: Option<String>) -> Self {
        let location = location.into();
        let identifier = match id {
            Some(id) if !id.trim().is_empty() => ArtifactId::new(id),
            _ => ArtifactId::new(location.clone()),
        };
        let filename = filename
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| filename_from_location(&location));
        Self {
            identifier,
            location,
            filename,
        }
    }

    pub fn from_location(location: impl Into<String>) -> Self {
        Self::new(location, None, None)
    }
}

/// Last non-empty path segment of a URL or path, ignoring query and fragment.
pub fn filename_from_location(location: &str) -> String {
    let without_query = location.split(['?', '#']).next().unwrap_or(location);
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or(""),
        None => without_query,
    };
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}
