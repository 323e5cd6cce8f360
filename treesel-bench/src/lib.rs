//! # treesel Bench
//!
//! Synthetic trees for benchmarking analysis and emission.

use treesel_schema::{BranchDef, ClassDef, ClassRegistry, CollectionKind, LeafDef, TreeDef};

const LEAF_TYPES: [&str; 4] = ["Int_t", "Float_t", "Double_t", "Long64_t"];

/// Builds a tree with `branches` top-level branches.
///
/// Branches cycle through scalar leaves, variable-length arrays, containers
/// of objects and split objects with `members` sub-branches, so every
/// analysis path is exercised.
#[must_use]
pub fn synthetic_tree(branches: usize, members: usize) -> TreeDef {
    let mut tree = TreeDef::new("bench")
        .with_title("Synthetic tree")
        .with_classes(synthetic_classes(branches));

    for i in 0..branches {
        let leaf_type = LEAF_TYPES[i % LEAF_TYPES.len()];
        let branch = match i % 4 {
            0 => BranchDef::leaf(format!("scalar{i}"), leaf_type),
            1 => BranchDef::new(format!("array{i}")).with_leaf(
                LeafDef::new(format!("array{i}"), leaf_type).with_title(format!("array{i}[n{i}]")),
            ),
            2 => BranchDef::object(format!("objects{i}"), format!("vector<Obj{i}>")),
            _ => {
                let name = format!("split{i}");
                let mut branch = BranchDef::object(format!("{name}."), format!("Obj{i}"));
                for m in 0..members {
                    branch = branch.with_branch(
                        BranchDef::new(format!("{name}.m{m}"))
                            .with_leaf(LeafDef::new(format!("m{m}"), leaf_type)),
                    );
                }
                branch
            }
        };
        tree.add_branch(branch);
    }

    tree
}

/// Builds the classes referenced by [`synthetic_tree`].
#[must_use]
pub fn synthetic_classes(branches: usize) -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    for i in 0..branches {
        registry.add_class(
            ClassDef::new(format!("Obj{i}")).with_decl_file(format!("include/obj/Obj{i}.h")),
        );
        registry.add_class(ClassDef::collection(
            format!("vector<Obj{i}>"),
            CollectionKind::Vector,
            Some(&format!("Obj{i}")),
        ));
    }
    registry
}
