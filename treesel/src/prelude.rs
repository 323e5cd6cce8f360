//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use treesel::prelude::*;
//! ```

// Core types
pub use treesel_core::{
    Diagnostic, DiagnosticKind, Dimension, HeaderDirective, HeaderSet, LeafKind, LocationTag,
    ReaderDescriptor, ReaderKind, ShapeIssue,
};

// Schema types
pub use treesel_schema::{
    BranchDef, ClassCatalog, ClassDef, ClassRegistry, CollectionKind, LeafDef, ParseError,
    SchemaError, TreeDef, parse_tree, parse_tree_file, validate_tree,
};

// Generation
pub use treesel_codegen::{
    ArtifactSink, Artifacts, CodegenError, DirectorySink, Generation, GenerationState, Generator,
    GeneratorConfig, MemorySink, SinkError, generate_from_file, generate_from_xml,
};
