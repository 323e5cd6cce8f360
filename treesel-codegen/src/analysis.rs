//! Schema analysis: one pass over the branches of a tree.
//!
//! Every top-level branch either produces reader descriptors or a
//! [`Diagnostic`] explaining why it was skipped. Header directives needed by
//! the readers accumulate in the [`GenerationState`] along the way.

use crate::error::CodegenError;
use crate::headers::HeaderResolver;
use crate::location::{Location, classify_location};
use crate::shape::classify_shape;
use std::collections::HashMap;
use treesel_core::{
    Diagnostic, HeaderSet, LeafKind, LocationTag, ReaderDescriptor, ReaderKind, ShapeIssue,
    to_identifier,
};
use treesel_schema::{BranchDef, ClassCatalog, ClassDef, TreeDef, leaf_dimensions, strip_dimensions};

/// Everything one generator run accumulates before emission.
#[derive(Debug, Clone)]
pub struct GenerationState {
    class_name: String,
    max_unroll: usize,
    headers: HeaderSet,
    readers: Vec<ReaderDescriptor>,
    diagnostics: Vec<Diagnostic>,
    accessors: HashMap<String, String>,
}

impl GenerationState {
    /// Creates an empty state for the given selector class.
    #[must_use]
    pub fn new(class_name: impl Into<String>, max_unroll: usize) -> Self {
        Self {
            class_name: class_name.into(),
            max_unroll,
            headers: HeaderSet::new(),
            readers: Vec::new(),
            diagnostics: Vec::new(),
            accessors: HashMap::new(),
        }
    }

    /// Returns the generated class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the split object unroll bound.
    #[must_use]
    pub const fn max_unroll(&self) -> usize {
        self.max_unroll
    }

    /// Returns the include directives in insertion order.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns the include directives for updating.
    pub fn headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    /// Returns the reader descriptors in branch order.
    #[must_use]
    pub fn readers(&self) -> &[ReaderDescriptor] {
        &self.readers
    }

    /// Returns the diagnostics of skipped branches.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Appends a reader.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateAccessorName` if another reader already
    /// uses the accessor name.
    pub fn add_reader(&mut self, reader: ReaderDescriptor) -> Result<(), CodegenError> {
        if let Some(first) = self.accessors.get(&reader.accessor_name) {
            return Err(CodegenError::duplicate_accessor(
                &reader.accessor_name,
                first,
                &reader.source_field_name,
            ));
        }

        tracing::debug!("Reader: {}", reader);
        self.accessors
            .insert(reader.accessor_name.clone(), reader.source_field_name.clone());
        self.readers.push(reader);
        Ok(())
    }

    /// Records a skipped branch.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("Skipping {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Records a branch skipped for an unsupported shape.
    pub fn skip(&mut self, field: &str, issue: ShapeIssue) {
        self.add_diagnostic(Diagnostic::unsupported_shape(field, issue));
    }
}

/// Walks the branches of a tree and fills a [`GenerationState`].
#[derive(Debug)]
pub struct Analyzer<'a, C: ?Sized> {
    catalog: &'a C,
    resolver: HeaderResolver<'a, C>,
}

impl<'a, C: ClassCatalog + ?Sized> Analyzer<'a, C> {
    /// Creates an analyzer.
    ///
    /// # Arguments
    /// * `catalog` - Class catalog used for object branches
    /// * `include_roots` - Include roots passed to the header resolver
    #[must_use]
    pub fn new(catalog: &'a C, include_roots: &'a [String]) -> Self {
        Self {
            catalog,
            resolver: HeaderResolver::new(catalog, include_roots),
        }
    }

    /// Analyzes all top-level branches of `tree`.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateAccessorName` if two readers collide.
    pub fn analyze(&self, tree: &TreeDef, state: &mut GenerationState) -> Result<(), CodegenError> {
        for branch in &tree.branches {
            self.analyze_branch(branch, state)?;
        }

        tracing::debug!(
            "Analyzed {}: {} readers, {} skipped, {} includes",
            tree.name,
            state.readers().len(),
            state.diagnostics().len(),
            state.headers().len()
        );
        Ok(())
    }

    fn analyze_branch(
        &self,
        branch: &BranchDef,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        tracing::debug!("Branch {}", branch.name);

        match self.known_class(branch) {
            Some(class) => self.analyze_object(branch, class, state),
            None => self.analyze_leaf_branch(branch, None, state),
        }
    }

    /// Returns the branch's class if the catalog knows it.
    fn known_class(&self, branch: &BranchDef) -> Option<&'a ClassDef> {
        let class_name = branch.class_name()?;
        let class = self.catalog.class(class_name);
        if class.is_none() {
            tracing::warn!(
                "Class {} of branch {} is unknown, reading it as a leaf branch",
                class_name,
                branch.name
            );
        }
        class
    }

    fn analyze_object(
        &self,
        branch: &BranchDef,
        class: &ClassDef,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        self.analyze_class_branch(branch, class, accessor_name(&branch.name), 0, state)
    }

    /// Analyzes a branch storing an object of a known class.
    ///
    /// `depth` is the split nesting level: 0 for top-level branches, 1 for
    /// members of a top-level split object, and so on.
    fn analyze_class_branch(
        &self,
        branch: &BranchDef,
        class: &ClassDef,
        accessor: String,
        depth: usize,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        self.resolver.resolve_class(class, state.headers_mut());

        let Some(location) = self.check_location(branch, class, state) else {
            return Ok(());
        };

        if !branch.is_split() {
            return state.add_reader(ReaderDescriptor::new(
                ReaderKind::Value,
                &class.name,
                accessor,
                &branch.name,
            ));
        }

        if location.tag.is_in_container() {
            state.skip(&branch.name, ShapeIssue::SplitContainer);
            return Ok(());
        }

        if depth == 0 && state.max_unroll() == 0 {
            return state.add_reader(ReaderDescriptor::new(
                ReaderKind::Value,
                &class.name,
                accessor,
                &branch.name,
            ));
        }

        self.unroll(branch, &accessor, depth, state)
    }

    /// Classifies the container location of a class branch.
    ///
    /// Returns `None` after recording a diagnostic if the location cannot be
    /// read.
    fn check_location(
        &self,
        branch: &BranchDef,
        class: &ClassDef,
        state: &mut GenerationState,
    ) -> Option<Location> {
        let location = match classify_location(self.catalog, class) {
            Ok(location) => location,
            Err(issue) => {
                state.skip(&branch.name, issue);
                return None;
            }
        };

        if location.tag == LocationTag::FixedContainerElement {
            state.skip(&branch.name, ShapeIssue::TopLevelFixedContainer);
            return None;
        }

        if location.tag.is_generic_container() && location.element_class.is_none() {
            let container = location.container.unwrap_or_else(|| class.name.clone());
            state.skip(&branch.name, ShapeIssue::RawContainerElement { container });
            return None;
        }

        Some(location)
    }

    /// Expands the members of a split object, or reports it if the unroll
    /// bound is reached.
    fn unroll(
        &self,
        branch: &BranchDef,
        accessor: &str,
        depth: usize,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        if depth >= state.max_unroll() {
            state.skip(
                &branch.name,
                ShapeIssue::NestedSplitObject {
                    branch: branch.name.clone(),
                },
            );
            return Ok(());
        }

        for child in &branch.branches {
            self.analyze_member(accessor, child, depth + 1, state)?;
        }
        Ok(())
    }

    /// Analyzes one member of an unrolled split object.
    fn analyze_member(
        &self,
        parent: &str,
        child: &BranchDef,
        depth: usize,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        tracing::debug!("Member {} of {}", child.name, parent);

        let accessor = to_identifier(&format!("{parent}_{}", member_name(&child.name)));

        match self.known_class(child) {
            Some(class) => self.analyze_class_branch(child, class, accessor, depth, state),
            None if child.is_split() => self.unroll(child, &accessor, depth, state),
            None => self.analyze_leaf_branch(child, Some(parent), state),
        }
    }

    /// Analyzes a branch read through its single legacy leaf.
    fn analyze_leaf_branch(
        &self,
        branch: &BranchDef,
        prefix: Option<&str>,
        state: &mut GenerationState,
    ) -> Result<(), CodegenError> {
        let leaf = match branch.leaves.as_slice() {
            [] => {
                state.skip(&branch.name, ShapeIssue::EmptyBranch);
                return Ok(());
            }
            [leaf] => leaf,
            leaves => {
                state.skip(
                    &branch.name,
                    ShapeIssue::MultiLeafBranch {
                        leaves: leaves.len(),
                    },
                );
                return Ok(());
            }
        };

        if leaf.kind == LeafKind::Object {
            state.add_diagnostic(Diagnostic::unsupported_leaf(
                &branch.name,
                &leaf.name,
                leaf.kind,
            ));
            return Ok(());
        }

        let dims = leaf_dimensions(leaf);
        let shape = match classify_shape(&leaf.type_name, &dims) {
            Ok(shape) => shape,
            Err(issue) => {
                state.skip(&branch.name, issue);
                return Ok(());
            }
        };

        if self.catalog.contains(&shape.element_type) {
            self.resolver.resolve(&shape.element_type, state.headers_mut());
        }

        let accessor = match prefix {
            Some(parent) => to_identifier(&format!("{parent}_{}", member_name(&leaf.name))),
            None => accessor_name(&leaf.name),
        };

        state.add_reader(ReaderDescriptor::new(
            shape.kind,
            shape.element_type,
            accessor,
            &branch.name,
        ))
    }
}

/// Returns the accessor name for a branch or leaf name.
///
/// Bracket suffixes and the trailing dot of top-level object branches are
/// dropped before sanitizing.
#[must_use]
pub fn accessor_name(raw: &str) -> String {
    let name = strip_dimensions(raw).trim_end_matches('.');
    to_identifier(name)
}

/// Returns the member part of a split object's sub-branch name.
fn member_name(raw: &str) -> &str {
    let name = strip_dimensions(raw).trim_end_matches('.');
    name.rsplit('.').next().unwrap_or(name)
}
