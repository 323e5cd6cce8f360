//! Tree description types.
//!
//! This module contains the data structures describing a tree: its
//! top-level branches, their leaves and sub-branches, and the classes the
//! branches declare.

use crate::classes::ClassRegistry;
use treesel_core::LeafKind;

/// Complete tree description.
#[derive(Debug, Clone, Default)]
pub struct TreeDef {
    /// Tree name.
    pub name: String,
    /// Tree title.
    pub title: String,
    /// File the tree was found on, if any.
    pub file: Option<String>,
    /// Whether the source is a chain of trees.
    pub is_chain: bool,
    /// Top-level branches in declaration order.
    pub branches: Vec<BranchDef>,
    /// Classes known for this tree.
    pub classes: ClassRegistry,
}

impl TreeDef {
    /// Creates a new empty tree description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the source file name.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Marks the tree as a chain.
    #[must_use]
    pub fn chained(mut self) -> Self {
        self.is_chain = true;
        self
    }

    /// Adds a top-level branch, builder style.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchDef) -> Self {
        self.branches.push(branch);
        self
    }

    /// Sets the class registry.
    #[must_use]
    pub fn with_classes(mut self, classes: ClassRegistry) -> Self {
        self.classes = classes;
        self
    }

    /// Adds a top-level branch.
    pub fn add_branch(&mut self, branch: BranchDef) {
        self.branches.push(branch);
    }

    /// Looks up a top-level branch by name.
    #[must_use]
    pub fn get_branch(&self, name: &str) -> Option<&BranchDef> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// Returns the description of where the tree was found, for banners.
    #[must_use]
    pub fn source_description(&self) -> &str {
        self.file.as_deref().unwrap_or("Memory Directory")
    }
}

/// One branch of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchDef {
    /// Branch name.
    pub name: String,
    /// Branch title.
    pub title: String,
    /// Declared class name, if the branch stores an object.
    pub class_name: Option<String>,
    /// Leaves in declaration order.
    pub leaves: Vec<LeafDef>,
    /// Sub-branches, non-empty for split objects.
    pub branches: Vec<BranchDef>,
}

impl BranchDef {
    /// Creates a branch without leaves or class.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a legacy branch holding a single leaf of the same name.
    #[must_use]
    pub fn leaf(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        let leaf = LeafDef::new(name.clone(), type_name);
        Self::new(name).with_leaf(leaf)
    }

    /// Creates a branch storing an object of the given class.
    #[must_use]
    pub fn object(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::new(name)
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a leaf, builder style.
    #[must_use]
    pub fn with_leaf(mut self, leaf: LeafDef) -> Self {
        self.leaves.push(leaf);
        self
    }

    /// Adds a sub-branch, builder style.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchDef) -> Self {
        self.branches.push(branch);
        self
    }

    /// Returns the declared class name if it is set and non-empty.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns true if the branch has sub-branches.
    #[must_use]
    pub fn is_split(&self) -> bool {
        !self.branches.is_empty()
    }
}

/// One leaf of a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafDef {
    /// Leaf name, possibly carrying bracket dimensions.
    pub name: String,
    /// Leaf title, possibly carrying bracket dimensions.
    pub title: String,
    /// Legacy type name, e.g. `float` or `Int_t`.
    pub type_name: String,
    /// Storage kind.
    pub kind: LeafKind,
}

impl LeafDef {
    /// Creates a basic leaf.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the storage kind.
    #[must_use]
    pub fn with_kind(mut self, kind: LeafKind) -> Self {
        self.kind = kind;
        self
    }
}
