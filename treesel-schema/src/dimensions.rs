//! Bracket-encoded array dimensions on legacy leaves.
//!
//! Legacy leaves encode their shape as bracket segments on the name or the
//! title: `x[3]` is a fixed array, `hits[nhits]` is sized by another branch
//! at read time and `x[]` loops over all elements.

use crate::types::LeafDef;
use treesel_core::{Dimension, LeafKind};

/// Scans a raw name or title for bracket segments, outermost first.
#[must_use]
pub fn scan_dimensions(raw: &str) -> Vec<Dimension> {
    let mut dims = Vec::new();
    let mut rest = raw;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let (content, next) = match after.find(']') {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => (after, ""),
        };
        dims.push(parse_segment(content));
        rest = next;
    }

    dims
}

fn parse_segment(content: &str) -> Dimension {
    let content = content.trim();
    if content.is_empty() {
        return Dimension::Unbounded;
    }
    match content.parse::<usize>() {
        Ok(n) => Dimension::Fixed(n),
        Err(_) => Dimension::RuntimeIndexed,
    }
}

/// Returns the dimensions of a leaf.
///
/// Both the name and the title are scanned and their dimensions concatenated.
/// A character array leaf without brackets gets one implicit dimension.
#[must_use]
pub fn leaf_dimensions(leaf: &LeafDef) -> Vec<Dimension> {
    let mut dims = scan_dimensions(&leaf.name);
    dims.extend(scan_dimensions(&leaf.title));

    if dims.is_empty() && leaf.kind == LeafKind::CharArray {
        dims.push(Dimension::Unbounded);
    }

    dims
}

/// Returns the text before the first bracket.
#[must_use]
pub fn strip_dimensions(raw: &str) -> &str {
    match raw.find('[') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}
