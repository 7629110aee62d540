use std::path::PathBuf;

/// Raised when a scenario's fixture data directory already exists.
///
/// A pre-existing fixture directory signals a stale or conflicting run. It must never be
/// silently reused, so baseline generation refuses to touch it and the run stops before
/// any artifact has been written for that scenario.
#[derive(Debug, thiserror::Error)]
#[error("fixture directory already exists: {}", path.display())]
pub struct FixtureExistsError {
    pub path: PathBuf,
}

impl FixtureExistsError {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Raised when a file a collaborator was expected to produce is absent at copy time.
#[derive(Debug, thiserror::Error)]
#[error("missing expected artifact: {}", path.display())]
pub struct MissingArtifactError {
    pub path: PathBuf,
}

impl MissingArtifactError {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
