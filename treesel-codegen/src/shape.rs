//! Maps a legacy leaf's element type and dimensions to a reader shape.

use treesel_core::{Dimension, ReaderKind, ShapeIssue};

/// Reader shape of a legacy leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Value or array reader.
    pub kind: ReaderKind,
    /// Canonical element type.
    pub element_type: String,
}

/// Classifies a leaf by rank.
///
/// Rank 0 reads a value, rank 1 reads an array. Higher ranks are rejected
/// rather than flattened.
///
/// # Errors
/// Returns `ShapeIssue::MultiDimensionalArray` for two or more dimensions.
pub fn classify_shape(element_type: &str, dims: &[Dimension]) -> Result<Shape, ShapeIssue> {
    let kind = match dims.len() {
        0 => ReaderKind::Value,
        1 => ReaderKind::Array,
        rank => return Err(ShapeIssue::MultiDimensionalArray { rank }),
    };

    Ok(Shape {
        kind,
        element_type: canonical_type_name(element_type),
    })
}

/// Returns the canonical spelling of a legacy type name.
#[must_use]
pub fn canonical_type_name(type_name: &str) -> String {
    type_name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_zero_is_value() {
        let shape = classify_shape("float", &[]).unwrap();
        assert_eq!(shape.kind, ReaderKind::Value);
        assert_eq!(shape.element_type, "float");
    }

    #[test]
    fn test_rank_one_is_array() {
        for dim in [
            Dimension::Fixed(3),
            Dimension::RuntimeIndexed,
            Dimension::Unbounded,
        ] {
            let shape = classify_shape("int", &[dim]).unwrap();
            assert_eq!(shape.kind, ReaderKind::Array);
            assert_eq!(shape.element_type, "int");
        }
    }

    #[test]
    fn test_rank_two_is_unsupported() {
        let result = classify_shape("double", &[Dimension::Fixed(3), Dimension::Fixed(4)]);
        assert_eq!(result, Err(ShapeIssue::MultiDimensionalArray { rank: 2 }));
    }

    #[test]
    fn test_type_name_is_trimmed() {
        let shape = classify_shape(" Int_t ", &[]).unwrap();
        assert_eq!(shape.element_type, "Int_t");
    }
}
