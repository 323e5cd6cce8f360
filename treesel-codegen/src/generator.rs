//! Main selector generator.

use crate::analysis::{Analyzer, GenerationState};
use crate::config::GeneratorConfig;
use crate::cpp::Artifacts;
use crate::error::CodegenError;
use crate::sink::ArtifactSink;
use treesel_core::to_identifier;
use treesel_schema::{ClassCatalog, ClassRegistry, TreeDef};

/// Output of a completed run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Accumulated readers, directives and diagnostics.
    pub state: GenerationState,
    /// Rendered artifacts.
    pub artifacts: Artifacts,
}

/// Selector generator for one tree.
///
/// Drives analysis of the tree against a class catalog, rendering of the
/// two artifacts and handing them to a sink.
pub struct Generator<'a, C: ?Sized = ClassRegistry> {
    tree: &'a TreeDef,
    catalog: &'a C,
    config: GeneratorConfig,
}

impl<'a> Generator<'a, ClassRegistry> {
    /// Creates a generator that uses the classes loaded with the tree.
    #[must_use]
    pub fn from_tree(tree: &'a TreeDef, config: GeneratorConfig) -> Self {
        Self::new(tree, &tree.classes, config)
    }
}

impl<'a, C: ClassCatalog + ?Sized> Generator<'a, C> {
    /// Creates a new generator.
    ///
    /// # Arguments
    /// * `tree` - Tree to generate a selector for
    /// * `catalog` - Class catalog for object branches
    /// * `config` - Generator settings
    #[must_use]
    pub fn new(tree: &'a TreeDef, catalog: &'a C, config: GeneratorConfig) -> Self {
        Self {
            tree,
            catalog,
            config,
        }
    }

    /// Returns the name of the generated class, sanitized into a C++
    /// identifier.
    #[must_use]
    pub fn class_name(&self) -> String {
        let name = self
            .config
            .class_name_override()
            .unwrap_or(&self.tree.name);
        to_identifier(name)
    }

    /// Analyzes the tree.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateAccessorName` if two readers collide.
    pub fn analyze(&self) -> Result<GenerationState, CodegenError> {
        let class_name = self.class_name();
        tracing::info!(
            "Generating selector {} for tree {}",
            class_name,
            self.tree.name
        );

        let mut state = GenerationState::new(class_name, self.config.unroll_depth());
        let analyzer = Analyzer::new(self.catalog, self.config.roots());
        analyzer.analyze(self.tree, &mut state)?;

        if !state.diagnostics().is_empty() {
            tracing::warn!(
                "{} branch(es) of {} have no reader",
                state.diagnostics().len(),
                self.tree.name
            );
        }
        Ok(state)
    }

    /// Renders the artifacts for an analyzed state.
    #[must_use]
    pub fn emit(&self, state: &GenerationState) -> Artifacts {
        Artifacts::render(self.tree, state)
    }

    /// Analyzes the tree and renders the artifacts.
    ///
    /// # Errors
    /// Returns `CodegenError` if analysis fails.
    pub fn generate(&self) -> Result<Generation, CodegenError> {
        let state = self.analyze()?;
        let artifacts = self.emit(&state);
        Ok(Generation { state, artifacts })
    }

    /// Writes the artifacts to a sink, declaration first.
    ///
    /// A failed write stops the run; an artifact already written stays.
    ///
    /// # Errors
    /// Returns `CodegenError::ArtifactWrite` naming the failed artifact.
    pub fn write<S: ArtifactSink + ?Sized>(
        &self,
        artifacts: &Artifacts,
        sink: &mut S,
    ) -> Result<(), CodegenError> {
        for artifact in artifacts.iter() {
            sink.write(&artifact.name, &artifact.contents)
                .map_err(|e| CodegenError::artifact_write(&artifact.name, e))?;
        }
        Ok(())
    }

    /// Analyzes, renders and writes in one go.
    ///
    /// # Errors
    /// Returns `CodegenError` if analysis or a write fails.
    pub fn run<S: ArtifactSink + ?Sized>(&self, sink: &mut S) -> Result<Generation, CodegenError> {
        let generation = self.generate()?;
        self.write(&generation.artifacts, sink)?;
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, SinkError};
    use treesel_core::{ReaderDescriptor, ReaderKind};
    use treesel_schema::{BranchDef, ClassDef, LeafDef};

    struct FailingSink {
        fail_on: &'static str,
        written: Vec<String>,
    }

    impl ArtifactSink for FailingSink {
        fn write(&mut self, target: &str, _contents: &str) -> Result<(), SinkError> {
            if target == self.fail_on {
                return Err(SinkError::from_io(
                    target,
                    std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                ));
            }
            self.written.push(target.to_string());
            Ok(())
        }
    }

    fn tree() -> TreeDef {
        TreeDef::new("events")
            .with_branch(BranchDef::leaf("px", "float"))
            .with_branch(
                BranchDef::new("hits")
                    .with_leaf(LeafDef::new("hits", "int").with_title("hits[nhits]/I")),
            )
    }

    #[test]
    fn test_class_name_defaults_to_tree_name() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::default());
        assert_eq!(generator.class_name(), "events");

        let generator = Generator::from_tree(&tree, GeneratorConfig::new().class_name("Sel"));
        assert_eq!(generator.class_name(), "Sel");
    }

    #[test]
    fn test_class_name_is_identifier() {
        let tree = TreeDef::new("my-tree").with_branch(BranchDef::leaf("px", "float"));
        let generation = Generator::from_tree(&tree, GeneratorConfig::default())
            .generate()
            .unwrap();

        assert_eq!(generation.state.class_name(), "my_tree");
        assert_eq!(generation.artifacts.declaration.name, "my_tree.h");
        assert_eq!(generation.artifacts.definition.name, "my_tree.C");
        let code = &generation.artifacts.declaration.contents;
        assert!(code.contains("#ifndef my_tree_h\n"));
        assert!(code.contains("class my_tree : public TSelector"));

        let generator = Generator::from_tree(&tree, GeneratorConfig::new().class_name("My Sel"));
        assert_eq!(generator.class_name(), "My_Sel");
        let generator = Generator::from_tree(&tree, GeneratorConfig::new().class_name("2016"));
        assert_eq!(generator.class_name(), "_2016");
    }

    #[test]
    fn test_generate() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::new().class_name("Sel"));
        let generation = generator.generate().unwrap();

        assert_eq!(
            generation.state.readers(),
            &[
                ReaderDescriptor::new(ReaderKind::Value, "float", "px", "px"),
                ReaderDescriptor::new(ReaderKind::Array, "int", "hits", "hits"),
            ]
        );
        assert!(generation.state.headers().is_empty());
        assert_eq!(generation.artifacts.declaration.name, "Sel.h");
        assert_eq!(generation.artifacts.definition.name, "Sel.C");
    }

    #[test]
    fn test_run_writes_both_artifacts() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::default());
        let mut sink = MemorySink::new();
        let generation = generator.run(&mut sink).unwrap();

        assert_eq!(sink.targets(), vec!["events.h", "events.C"]);
        assert_eq!(
            sink.get("events.h"),
            Some(generation.artifacts.declaration.contents.as_str())
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::default());
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();

        assert_eq!(first.artifacts, second.artifacts);
    }

    #[test]
    fn test_failed_definition_write_keeps_declaration() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::default());
        let mut sink = FailingSink {
            fail_on: "events.C",
            written: Vec::new(),
        };

        match generator.run(&mut sink) {
            Err(CodegenError::ArtifactWrite { target, source }) => {
                assert_eq!(target, "events.C");
                assert!(matches!(source, SinkError::PermissionDenied { .. }));
            }
            other => panic!("expected write error, got {other:?}"),
        }
        assert_eq!(sink.written, vec!["events.h"]);
    }

    #[test]
    fn test_failed_declaration_write_stops_run() {
        let tree = tree();
        let generator = Generator::from_tree(&tree, GeneratorConfig::default());
        let mut sink = FailingSink {
            fail_on: "events.h",
            written: Vec::new(),
        };

        assert!(generator.run(&mut sink).is_err());
        assert!(sink.written.is_empty());
    }

    #[test]
    fn test_external_catalog() {
        let tree = TreeDef::new("t").with_branch(BranchDef::object("track", "Track"));
        let catalog = ClassRegistry::new()
            .with_class(ClassDef::new("Track").with_decl_file("include/Track.h"));
        let generator = Generator::new(&tree, &catalog, GeneratorConfig::default());
        let generation = generator.generate().unwrap();

        assert_eq!(generation.state.readers()[0].element_type, "Track");
        assert!(
            generation
                .artifacts
                .declaration
                .contents
                .contains("#include \"Track.h\"\n")
        );
    }

    #[test]
    fn test_catalog_as_trait_object() {
        let tree = TreeDef::new("t").with_branch(BranchDef::object("track", "Track"));
        let registry = ClassRegistry::new().with_class(ClassDef::new("Track"));
        let catalog: &dyn ClassCatalog = &registry;
        let generator = Generator::new(&tree, catalog, GeneratorConfig::default());

        assert_eq!(generator.generate().unwrap().state.readers().len(), 1);
    }
}
