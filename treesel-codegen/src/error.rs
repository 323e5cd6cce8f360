//! Error types for code generation.

use crate::sink::SinkError;
use thiserror::Error;

/// Error type for code generation operations.
///
/// Only run-level failures are errors. Branches the analyzer cannot handle
/// are reported as [`treesel_core::Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Tree description parsing error.
    #[error("tree parse error: {0}")]
    Parse(#[from] treesel_schema::ParseError),

    /// Tree validation error.
    #[error("tree error: {0}")]
    Schema(#[from] treesel_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Two readers would get the same member name.
    #[error("duplicate accessor '{name}' for branches '{first}' and '{second}'")]
    DuplicateAccessorName {
        /// Accessor name.
        name: String,
        /// Branch that claimed the name first.
        first: String,
        /// Branch that collided with it.
        second: String,
    },

    /// An artifact could not be persisted.
    #[error("cannot write artifact '{target}': {source}")]
    ArtifactWrite {
        /// Artifact name.
        target: String,
        /// Underlying sink failure.
        #[source]
        source: SinkError,
    },
}

impl CodegenError {
    /// Creates a duplicate accessor error.
    pub fn duplicate_accessor(
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateAccessorName {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an artifact write error.
    pub fn artifact_write(target: impl Into<String>, source: SinkError) -> Self {
        Self::ArtifactWrite {
            target: target.into(),
            source,
        }
    }
}
