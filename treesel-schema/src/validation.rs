//! Tree validation utilities.
//!
//! This module checks a tree description for structural problems that would
//! make the generated scaffolding ambiguous, independently of which shapes the
//! analyzer supports.

use crate::classes::ClassRegistry;
use crate::error::SchemaError;
use crate::types::{BranchDef, TreeDef};
use std::collections::HashSet;

/// Validates a parsed tree description.
///
/// # Arguments
/// * `tree` - The tree to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_tree(tree: &TreeDef) -> Result<(), SchemaError> {
    if tree.name.is_empty() {
        return Err(SchemaError::validation("tree has no name"));
    }
    validate_classes(&tree.classes)?;
    validate_branches(&tree.name, &tree.branches)?;
    Ok(())
}

/// Validates the class definitions.
fn validate_classes(classes: &ClassRegistry) -> Result<(), SchemaError> {
    for class in classes.iter() {
        if class.value_class.is_some() && class.collection.is_none() {
            return Err(SchemaError::validation(format!(
                "class '{}' has an element class but no collection kind",
                class.name
            )));
        }

        if class.is_clones && class.collection.is_some() {
            return Err(SchemaError::validation(format!(
                "class '{}' cannot be both a dynamic object array and a collection",
                class.name
            )));
        }
    }

    Ok(())
}

/// Validates sibling branches and recurses into sub-branches.
fn validate_branches(parent: &str, branches: &[BranchDef]) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for branch in branches {
        if branch.name.is_empty() {
            return Err(SchemaError::validation(format!(
                "unnamed branch under '{parent}'"
            )));
        }

        if !seen_names.insert(&branch.name) {
            return Err(SchemaError::DuplicateBranch {
                name: branch.name.clone(),
                parent: parent.to_string(),
            });
        }

        for leaf in &branch.leaves {
            if leaf.name.is_empty() {
                return Err(SchemaError::validation(format!(
                    "unnamed leaf in branch '{}'",
                    branch.name
                )));
            }
        }

        validate_branches(&branch.name, &branch.branches)?;
    }

    Ok(())
}
