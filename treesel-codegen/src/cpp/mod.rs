//! C++ selector generation modules.
//!
//! The declaration artifact (`<Class>.h`) carries the reader members and the
//! framework boilerplate; the definition artifact (`<Class>.C`) carries the
//! lifecycle method stubs the user fills in.

pub mod declaration;
pub mod definition;

pub use declaration::DeclarationGenerator;
pub use definition::DefinitionGenerator;

use crate::analysis::GenerationState;
use treesel_schema::TreeDef;

/// Banner line naming the generator.
pub(crate) const GENERATOR_BANNER: &str = concat!("treesel ", env!("CARGO_PKG_VERSION"));

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, e.g. `MySelector.h`.
    pub name: String,
    /// File contents.
    pub contents: String,
}

impl Artifact {
    /// Creates an artifact.
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// The declaration and definition artifacts of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// `<Class>.h`
    pub declaration: Artifact,
    /// `<Class>.C`
    pub definition: Artifact,
}

impl Artifacts {
    /// Renders both artifacts.
    #[must_use]
    pub fn render(tree: &TreeDef, state: &GenerationState) -> Self {
        let class = state.class_name();
        Self {
            declaration: Artifact::new(
                declaration_file_name(class),
                DeclarationGenerator::new(tree, state).generate(),
            ),
            definition: Artifact::new(
                definition_file_name(class),
                DefinitionGenerator::new(state).generate(),
            ),
        }
    }

    /// Returns both artifacts in write order.
    #[must_use]
    pub fn iter(&self) -> [&Artifact; 2] {
        [&self.declaration, &self.definition]
    }
}

/// Returns the declaration file name for a class.
#[must_use]
pub fn declaration_file_name(class_name: &str) -> String {
    format!("{class_name}.h")
}

/// Returns the definition file name for a class.
#[must_use]
pub fn definition_file_name(class_name: &str) -> String {
    format!("{class_name}.C")
}

/// Escapes text for use inside a C++ string literal.
pub(crate) fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
