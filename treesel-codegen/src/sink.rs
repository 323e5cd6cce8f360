//! Artifact sinks: where generated text ends up.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reported by an artifact sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The target location does not exist.
    #[error("target '{target}' not found: {source}")]
    NotFound {
        /// Artifact name.
        target: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The sink may not write the target.
    #[error("permission denied for target '{target}': {source}")]
    PermissionDenied {
        /// Artifact name.
        target: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Any other write failure.
    #[error("failed to write '{target}': {source}")]
    Write {
        /// Artifact name.
        target: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Classifies an IO error raised while writing `target`.
    pub fn from_io(target: impl Into<String>, err: io::Error) -> Self {
        let target = target.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { target, source: err },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                target,
                source: err,
            },
            _ => Self::Write {
                target,
                source: err,
            },
        }
    }
}

/// Persists generated artifacts.
pub trait ArtifactSink {
    /// Writes `contents` under the name `target`.
    ///
    /// # Errors
    /// Returns `SinkError` if the artifact cannot be persisted.
    fn write(&mut self, target: &str, contents: &str) -> Result<(), SinkError>;
}

/// Writes artifacts as files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into an existing directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the directory (and parents) if needed, then returns the sink.
    ///
    /// # Errors
    /// Returns the IO error if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path an artifact is written to.
    #[must_use]
    pub fn path_for(&self, target: &str) -> PathBuf {
        self.dir.join(target)
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, target: &str, contents: &str) -> Result<(), SinkError> {
        let path = self.path_for(target);
        std::fs::write(&path, contents).map_err(|e| SinkError::from_io(target, e))?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// Keeps artifacts in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: Vec<(String, String)>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contents written under `target`, if any.
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, contents)| contents.as_str())
    }

    /// Returns the artifact names in write order.
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        self.artifacts.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the number of stored artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, target: &str, contents: &str) -> Result<(), SinkError> {
        match self.artifacts.iter_mut().find(|(name, _)| name == target) {
            Some((_, existing)) => *existing = contents.to_string(),
            None => self
                .artifacts
                .push((target.to_string(), contents.to_string())),
        }
        Ok(())
    }
}
