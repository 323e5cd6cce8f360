//! Include directives and the insertion-ordered directive set.

use std::collections::HashSet;

/// One line of generated source declaring an external type dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderDirective {
    /// Type that first required this directive.
    pub for_type: String,
    /// Directive text without trailing newline, e.g. `#include <vector>`.
    pub text: String,
}

impl HeaderDirective {
    /// Creates a new header directive.
    #[must_use]
    pub fn new(for_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            for_type: for_type.into(),
            text: text.into(),
        }
    }

    /// Creates a system include, `#include <name>`.
    #[must_use]
    pub fn system(for_type: impl Into<String>, name: &str) -> Self {
        Self::new(for_type, format!("#include <{name}>"))
    }

    /// Creates a local include, `#include "path"`.
    #[must_use]
    pub fn local(for_type: impl Into<String>, path: &str) -> Self {
        Self::new(for_type, format!("#include \"{path}\""))
    }
}

/// Insertion-ordered set of header directives keyed by directive text.
///
/// Also tracks which type names have already been resolved, so resolving the
/// same type twice is a no-op and self-referencing containers terminate.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    directives: Vec<HeaderDirective>,
    texts: HashSet<String>,
    resolved_types: HashSet<String>,
}

impl HeaderSet {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directive unless one with identical text is already present.
    ///
    /// Returns true if the directive was added.
    pub fn insert(&mut self, directive: HeaderDirective) -> bool {
        if self.texts.contains(&directive.text) {
            return false;
        }
        self.texts.insert(directive.text.clone());
        self.directives.push(directive);
        true
    }

    /// Returns true if a directive with this text is present.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Marks a type as resolved. Returns false if it was already marked.
    pub fn mark_resolved(&mut self, type_name: &str) -> bool {
        self.resolved_types.insert(type_name.to_string())
    }

    /// Returns true if the type was already resolved in this run.
    #[must_use]
    pub fn is_resolved(&self, type_name: &str) -> bool {
        self.resolved_types.contains(type_name)
    }

    /// Iterates over the directives in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderDirective> {
        self.directives.iter()
    }

    /// Returns the directives as a slice in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[HeaderDirective] {
        &self.directives
    }

    /// Returns the number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns true if no directive was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a HeaderDirective;
    type IntoIter = std::slice::Iter<'a, HeaderDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
