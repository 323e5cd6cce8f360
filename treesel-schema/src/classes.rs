//! Class catalog: the narrow reflection interface the generator relies on.
//!
//! The generator never inspects class layouts. For a class name it only needs
//! to know the declaration file, whether the class is a generic container
//! (and of which kind, holding which element class), and whether it is the
//! dynamic object array type.

use std::collections::HashMap;
use std::fmt;

/// Name of the dynamic object array class.
pub const CLONES_ARRAY_CLASS: &str = "TClonesArray";

/// Kind of a generic sequence or associative container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// `vector`
    Vector,
    /// `list`
    List,
    /// `deque`
    Deque,
    /// `map`
    Map,
    /// `multimap`
    MultiMap,
    /// `set`
    Set,
    /// `multiset`
    MultiSet,
    /// `bitset`
    Bitset,
    /// `forward_list`
    ForwardList,
    /// `unordered_set`
    UnorderedSet,
    /// `unordered_multiset`
    UnorderedMultiSet,
    /// `unordered_map`
    UnorderedMap,
    /// `unordered_multimap`
    UnorderedMultiMap,
}

impl CollectionKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 13] = [
        Self::Vector,
        Self::List,
        Self::Deque,
        Self::Map,
        Self::MultiMap,
        Self::Set,
        Self::MultiSet,
        Self::Bitset,
        Self::ForwardList,
        Self::UnorderedSet,
        Self::UnorderedMultiSet,
        Self::UnorderedMap,
        Self::UnorderedMultiMap,
    ];

    /// Returns the kind for a numeric kind code.
    ///
    /// Negative codes mark the same kinds as their positive counterparts.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        let index = code.unsigned_abs() as usize;
        if index == 0 {
            return None;
        }
        Self::ALL.get(index - 1).copied()
    }

    /// Returns the positive numeric kind code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Vector => 1,
            Self::List => 2,
            Self::Deque => 3,
            Self::Map => 4,
            Self::MultiMap => 5,
            Self::Set => 6,
            Self::MultiSet => 7,
            Self::Bitset => 8,
            Self::ForwardList => 9,
            Self::UnorderedSet => 10,
            Self::UnorderedMultiSet => 11,
            Self::UnorderedMap => 12,
            Self::UnorderedMultiMap => 13,
        }
    }

    /// Returns the template name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::List => "list",
            Self::Deque => "deque",
            Self::Map => "map",
            Self::MultiMap => "multimap",
            Self::Set => "set",
            Self::MultiSet => "multiset",
            Self::Bitset => "bitset",
            Self::ForwardList => "forward_list",
            Self::UnorderedSet => "unordered_set",
            Self::UnorderedMultiSet => "unordered_multiset",
            Self::UnorderedMap => "unordered_map",
            Self::UnorderedMultiMap => "unordered_multimap",
        }
    }

    /// Returns the standard header that declares the kind, if mapped.
    ///
    /// Multi-valued variants share the header of their single-valued kind.
    #[must_use]
    pub const fn header(&self) -> Option<&'static str> {
        match self {
            Self::Vector => Some("vector"),
            Self::List => Some("list"),
            Self::ForwardList => Some("forward_list"),
            Self::Deque => Some("deque"),
            Self::Map | Self::MultiMap => Some("map"),
            Self::Set | Self::MultiSet => Some("set"),
            Self::UnorderedSet | Self::UnorderedMultiSet => Some("unordered_set"),
            Self::UnorderedMap | Self::UnorderedMultiMap => Some("unordered_map"),
            Self::Bitset => None,
        }
    }

    /// Parses a kind from its template name (optionally `std::`-qualified) or
    /// from a signed numeric code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code);
        }
        let name = s.strip_prefix("std::").unwrap_or(s);
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reflection data for one class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDef {
    /// Class name as it appears in branch declarations.
    pub name: String,
    /// Declaration file path, if the class has one.
    pub decl_file: Option<String>,
    /// Container kind, if the class is a generic container.
    pub collection: Option<CollectionKind>,
    /// Element class of the container, if it holds a class.
    pub value_class: Option<String>,
    /// Whether this is the dynamic object array type.
    pub is_clones: bool,
}

impl ClassDef {
    /// Creates a plain class without declaration file.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates the dynamic object array class.
    #[must_use]
    pub fn clones_array() -> Self {
        Self {
            name: CLONES_ARRAY_CLASS.to_string(),
            is_clones: true,
            ..Self::default()
        }
    }

    /// Creates a generic container class.
    #[must_use]
    pub fn collection(
        name: impl Into<String>,
        kind: CollectionKind,
        value_class: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            collection: Some(kind),
            value_class: value_class.map(str::to_string),
            ..Self::default()
        }
    }

    /// Sets the declaration file.
    #[must_use]
    pub fn with_decl_file(mut self, path: impl Into<String>) -> Self {
        self.decl_file = Some(path.into());
        self
    }

    /// Returns true if the class is a generic container.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.collection.is_some()
    }

    /// Returns the declaration file if it is set and non-empty.
    #[must_use]
    pub fn decl_file(&self) -> Option<&str> {
        self.decl_file.as_deref().filter(|path| !path.is_empty())
    }
}

/// Capability interface answering reflection questions by class name.
pub trait ClassCatalog {
    /// Looks up a class by name.
    fn class(&self, name: &str) -> Option<&ClassDef>;

    /// Returns true if the class is known.
    fn contains(&self, name: &str) -> bool {
        self.class(name).is_some()
    }
}

impl<C: ClassCatalog + ?Sized> ClassCatalog for &C {
    fn class(&self, name: &str) -> Option<&ClassDef> {
        (**self).class(name)
    }
}

/// In-memory class catalog.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassDef>,
    index: HashMap<String, usize>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class definition.
    ///
    /// Returns false and leaves the registry unchanged if a class with the same
    /// name is already registered.
    pub fn add_class(&mut self, class: ClassDef) -> bool {
        if self.index.contains_key(&class.name) {
            return false;
        }
        self.index.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        true
    }

    /// Adds a class definition, builder style.
    #[must_use]
    pub fn with_class(mut self, class: ClassDef) -> Self {
        self.add_class(class);
        self
    }

    /// Iterates over the classes in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassDef> {
        self.classes.iter()
    }

    /// Returns the number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassCatalog for ClassRegistry {
    fn class(&self, name: &str) -> Option<&ClassDef> {
        self.index.get(name).map(|&idx| &self.classes[idx])
    }
}
