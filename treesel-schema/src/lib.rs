//! # treesel Schema
//!
//! Tree description model and class catalog.
//!
//! This crate provides:
//! - Branch and leaf definitions for a tree
//! - The class catalog capability used in place of a live reflection service
//! - XML tree description parsing
//! - Bracket dimension parsing for legacy leaves
//! - Tree validation

pub mod classes;
pub mod dimensions;
pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use classes::{CLONES_ARRAY_CLASS, ClassCatalog, ClassDef, ClassRegistry, CollectionKind};
pub use dimensions::{leaf_dimensions, scan_dimensions, strip_dimensions};
pub use error::{ParseError, SchemaError};
pub use parser::{parse_tree, parse_tree_file};
pub use treesel_core::LeafKind;
pub use types::{BranchDef, LeafDef, TreeDef};
pub use validation::validate_tree;
