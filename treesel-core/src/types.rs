//! Reader and shape types shared by the analyzer and the emitters.
//!
//! These describe *how* a branch will be read by the generated scaffolding:
//! the array dimensions found on a leaf, the container location of a
//! composite branch and the resulting reader descriptor.

use std::fmt;

/// One array dimension parsed from a bracket segment such as `[3]`, `[n]` or `[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Fixed number of elements (`[3]`).
    Fixed(usize),
    /// Length taken at read time from another branch (`[nhits]`).
    RuntimeIndexed,
    /// Loop over all elements (`[]`).
    Unbounded,
}

impl Dimension {
    /// Returns the fixed size, if any.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "[{n}]"),
            Self::RuntimeIndexed => f.write_str("[<var>]"),
            Self::Unbounded => f.write_str("[]"),
        }
    }
}

/// Read shape of a generated accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderKind {
    /// Scalar or whole-object value.
    Value,
    /// One-dimensional array.
    Array,
}

impl ReaderKind {
    /// Returns the reader template used by the generated selector.
    #[must_use]
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::Value => "TTreeReaderValue",
            Self::Array => "TTreeReaderArray",
        }
    }

    /// Returns a short lowercase label for logs and diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Array => "array",
        }
    }
}

/// Where a composite branch's declared class sits relative to container nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocationTag {
    /// Not inside any container.
    #[default]
    TopLevel,
    /// Element of a dynamic object array (`TClonesArray`).
    FixedContainerElement,
    /// Element of a generic sequence or associative container.
    GenericContainerElement,
    /// Dynamic object array reached from inside another container.
    NestedFixedContainerElement,
    /// Generic container reached from inside another container.
    NestedGenericContainerElement,
}

impl LocationTag {
    /// Returns true for either kind of dynamic object array location.
    #[must_use]
    pub const fn is_fixed_container(&self) -> bool {
        matches!(
            self,
            Self::FixedContainerElement | Self::NestedFixedContainerElement
        )
    }

    /// Returns true for either kind of generic container location.
    #[must_use]
    pub const fn is_generic_container(&self) -> bool {
        matches!(
            self,
            Self::GenericContainerElement | Self::NestedGenericContainerElement
        )
    }

    /// Returns true if the tag sits inside any container.
    #[must_use]
    pub const fn is_in_container(&self) -> bool {
        !matches!(self, Self::TopLevel)
    }

    /// Returns true for the nested variants.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(
            self,
            Self::NestedFixedContainerElement | Self::NestedGenericContainerElement
        )
    }
}

/// Specification of one generated accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReaderDescriptor {
    /// Value or array reader.
    pub kind: ReaderKind,
    /// Element type used as the reader's template argument.
    pub element_type: String,
    /// Member name in the generated class.
    pub accessor_name: String,
    /// Branch the reader is bound to.
    pub source_field_name: String,
}

impl ReaderDescriptor {
    /// Creates a new reader descriptor.
    #[must_use]
    pub fn new(
        kind: ReaderKind,
        element_type: impl Into<String>,
        accessor_name: impl Into<String>,
        source_field_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            element_type: element_type.into(),
            accessor_name: accessor_name.into(),
            source_field_name: source_field_name.into(),
        }
    }

    /// Returns the reader declaration type, e.g. `TTreeReaderArray<int>`.
    #[must_use]
    pub fn reader_type(&self) -> String {
        format!("{}<{}>", self.kind.template_name(), self.element_type)
    }
}

impl fmt::Display for ReaderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (branch: {})",
            self.reader_type(),
            self.accessor_name,
            self.source_field_name
        )
    }
}

/// Converts a branch or leaf name into a valid C++ identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit is
/// prefixed with `_`.
#[must_use]
pub fn to_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    if result.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
