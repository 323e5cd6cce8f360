//! Per-field analysis diagnostics.
//!
//! A diagnostic records a branch that the analyzer skipped because its
//! storage shape is not handled. Diagnostics never abort a run.

use std::fmt;
use thiserror::Error;

/// Storage shapes the analyzer recognizes but does not generate readers for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeIssue {
    /// Legacy leaf with two or more array dimensions.
    #[error("{rank}-dimensional arrays are not supported")]
    MultiDimensionalArray {
        /// Number of dimensions found.
        rank: usize,
    },

    /// Legacy branch holding more than one leaf.
    #[error("branches with {leaves} leaves are not supported")]
    MultiLeafBranch {
        /// Number of leaves on the branch.
        leaves: usize,
    },

    /// Legacy branch without any leaf.
    #[error("branch has no leaves")]
    EmptyBranch,

    /// Container of container of container.
    #[error("container nesting deeper than one extra level is not supported")]
    ContainerNestingTooDeep,

    /// Container whose element is a raw type or a class the catalog does not know.
    #[error("raw or unknown element type inside container '{container}' is not supported")]
    RawContainerElement {
        /// Container class name.
        container: String,
    },

    /// Dynamic object array stored directly as a top-level branch.
    #[error("top-level dynamic object array branches are not supported")]
    TopLevelFixedContainer,

    /// Container whose elements are split into sub-branches.
    #[error("split container branches are not supported")]
    SplitContainer,

    /// Split object found inside another split object.
    #[error("nested split object '{branch}' is not supported")]
    NestedSplitObject {
        /// Name of the nested sub-branch.
        branch: String,
    },
}

/// Leaf storage kinds as seen by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeafKind {
    /// Numeric or boolean leaf.
    #[default]
    Basic,
    /// C string stored as a character array.
    CharArray,
    /// Pointer to an object stored through a legacy object leaf.
    Object,
}

impl LeafKind {
    /// Returns the schema name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::CharArray => "char",
            Self::Object => "object",
        }
    }

    /// Parses a leaf kind from its schema name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "" => Some(Self::Basic),
            "char" | "chararray" | "string" => Some(Self::CharArray),
            "object" => Some(Self::Object),
            _ => None,
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// The leaf kind itself is not handled.
    #[error("unsupported leaf kind '{leaf_kind}' for leaf '{leaf}'")]
    UnsupportedLeafKind {
        /// Leaf name.
        leaf: String,
        /// Leaf storage kind.
        leaf_kind: LeafKind,
    },

    /// The storage shape is not handled.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(#[from] ShapeIssue),
}

/// A skipped field together with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the branch the diagnostic is about.
    pub field: String,
    /// Reason.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Creates an unsupported-shape diagnostic.
    #[must_use]
    pub fn unsupported_shape(field: impl Into<String>, issue: ShapeIssue) -> Self {
        Self::new(field, DiagnosticKind::UnsupportedShape(issue))
    }

    /// Creates an unsupported-leaf-kind diagnostic.
    #[must_use]
    pub fn unsupported_leaf(
        field: impl Into<String>,
        leaf: impl Into<String>,
        leaf_kind: LeafKind,
    ) -> Self {
        Self::new(
            field,
            DiagnosticKind::UnsupportedLeafKind {
                leaf: leaf.into(),
                leaf_kind,
            },
        )
    }

    /// Returns true for unsupported-shape diagnostics.
    #[must_use]
    pub const fn is_unsupported_shape(&self) -> bool {
        matches!(self.kind, DiagnosticKind::UnsupportedShape(_))
    }

    /// Returns the shape issue, if this is an unsupported-shape diagnostic.
    #[must_use]
    pub const fn shape_issue(&self) -> Option<&ShapeIssue> {
        match &self.kind {
            DiagnosticKind::UnsupportedShape(issue) => Some(issue),
            DiagnosticKind::UnsupportedLeafKind { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_kind_parse() {
        assert_eq!(LeafKind::parse("basic"), Some(LeafKind::Basic));
        assert_eq!(LeafKind::parse(""), Some(LeafKind::Basic));
        assert_eq!(LeafKind::parse("Char"), Some(LeafKind::CharArray));
        assert_eq!(LeafKind::parse("object"), Some(LeafKind::Object));
        assert_eq!(LeafKind::parse("pointer"), None);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::unsupported_shape(
            "matrix",
            ShapeIssue::MultiDimensionalArray { rank: 2 },
        );
        assert_eq!(
            diag.to_string(),
            "matrix: unsupported shape: 2-dimensional arrays are not supported"
        );

        let diag = Diagnostic::unsupported_leaf("obj", "obj", LeafKind::Object);
        assert_eq!(
            diag.to_string(),
            "obj: unsupported leaf kind 'object' for leaf 'obj'"
        );
    }

    #[test]
    fn test_shape_issue_accessor() {
        let diag = Diagnostic::unsupported_shape("b", ShapeIssue::EmptyBranch);
        assert!(diag.is_unsupported_shape());
        assert_eq!(diag.shape_issue(), Some(&ShapeIssue::EmptyBranch));

        let diag = Diagnostic::unsupported_leaf("b", "b", LeafKind::Object);
        assert!(!diag.is_unsupported_shape());
        assert!(diag.shape_issue().is_none());
    }

    #[test]
    fn test_shape_issue_into_kind() {
        let kind: DiagnosticKind = ShapeIssue::SplitContainer.into();
        assert!(matches!(
            kind,
            DiagnosticKind::UnsupportedShape(ShapeIssue::SplitContainer)
        ));
    }
}
