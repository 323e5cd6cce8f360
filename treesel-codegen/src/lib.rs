//! # treesel Codegen
//!
//! Selector generation from tree descriptions.
//!
//! This crate provides:
//! - Shape and container classification of branches
//! - Include directive resolution against a class catalog
//! - Schema analysis into reader descriptors and diagnostics
//! - C++ selector declaration/definition generation
//! - Artifact sinks for writing the generated files

pub mod analysis;
pub mod config;
pub mod cpp;
pub mod error;
pub mod generator;
pub mod headers;
pub mod location;
pub mod shape;
pub mod sink;

pub use analysis::{Analyzer, GenerationState};
pub use config::GeneratorConfig;
pub use cpp::{Artifact, Artifacts};
pub use error::CodegenError;
pub use generator::{Generation, Generator};
pub use headers::HeaderResolver;
pub use location::{Location, classify_location};
pub use shape::{Shape, classify_shape};
pub use sink::{ArtifactSink, DirectorySink, MemorySink, SinkError};

/// Generates a selector from an XML tree description.
///
/// The tree is validated before analysis. Classes declared in the
/// description form the class catalog.
///
/// # Arguments
/// * `xml` - XML tree description
/// * `config` - Generator settings
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or analysis fails.
pub fn generate_from_xml(xml: &str, config: GeneratorConfig) -> Result<Generation, CodegenError> {
    let tree = treesel_schema::parse_tree(xml)?;
    treesel_schema::validate_tree(&tree)?;
    Generator::from_tree(&tree, config).generate()
}

/// Generates a selector from an XML tree description file.
///
/// # Arguments
/// * `path` - Path to the XML tree description
/// * `config` - Generator settings
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or analysis fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: GeneratorConfig,
) -> Result<Generation, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}
