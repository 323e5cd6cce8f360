//! # treesel Core
//!
//! Core data model for generating reader-based selector scaffolding from a
//! tree of branches.
//!
//! This crate provides:
//! - Array dimensions and reader kinds
//! - Reader descriptors and container location tags
//! - Include directives and the ordered directive set
//! - Per-field diagnostics for skipped branches

pub mod diagnostic;
pub mod header;
pub mod types;

pub use diagnostic::{Diagnostic, DiagnosticKind, LeafKind, ShapeIssue};
pub use header::{HeaderDirective, HeaderSet};
pub use types::{Dimension, LocationTag, ReaderDescriptor, ReaderKind, to_identifier};
