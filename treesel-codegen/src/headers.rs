//! Include directive resolution.
//!
//! Given a class, computes the include directives needed to declare it in
//! the generated selector, recursing into container element classes and
//! `pair` arguments. Results accumulate in a [`HeaderSet`], so resolving the
//! same class again, or two classes that need the same header, adds nothing.

use treesel_core::{HeaderDirective, HeaderSet};
use treesel_schema::{ClassCatalog, ClassDef};

/// Name of the string class, which maps to the standard string header.
const STRING_CLASS: &str = "string";

/// Resolves include directives against a class catalog.
#[derive(Debug)]
pub struct HeaderResolver<'a, C: ?Sized> {
    catalog: &'a C,
    include_roots: &'a [String],
}

impl<'a, C: ClassCatalog + ?Sized> HeaderResolver<'a, C> {
    /// Creates a resolver.
    ///
    /// # Arguments
    /// * `catalog` - Class catalog to look classes up in
    /// * `include_roots` - Path prefixes stripped from declaration files
    #[must_use]
    pub fn new(catalog: &'a C, include_roots: &'a [String]) -> Self {
        Self {
            catalog,
            include_roots,
        }
    }

    /// Resolves a class by name. Names the catalog does not know, such as
    /// primitive types, contribute nothing.
    pub fn resolve(&self, class_name: &str, headers: &mut HeaderSet) {
        let class_name = class_name.trim();
        let class_name = class_name.strip_prefix("const ").unwrap_or(class_name).trim();

        if let Some(class) = self.catalog.class(class_name) {
            self.resolve_class(class, headers);
        } else if class_name == STRING_CLASS && headers.mark_resolved(class_name) {
            add(headers, HeaderDirective::system(class_name, "string"));
        }
    }

    /// Resolves a class definition.
    pub fn resolve_class(&self, class: &ClassDef, headers: &mut HeaderSet) {
        if !headers.mark_resolved(&class.name) {
            return;
        }
        tracing::debug!("Resolving headers for {}", class.name);

        if let Some(directive) = self.directive_for(class, headers) {
            add(headers, directive);
        }
    }

    fn directive_for(&self, class: &ClassDef, headers: &mut HeaderSet) -> Option<HeaderDirective> {
        if class.name == STRING_CLASS {
            return Some(HeaderDirective::system(&class.name, "string"));
        }

        if let Some(kind) = class.collection {
            // Element headers go first.
            if let Some(value) = &class.value_class {
                self.resolve(value, headers);
            }
            return kind
                .header()
                .map(|header| HeaderDirective::system(&class.name, header));
        }

        if let Some(path) = class.decl_file() {
            return Some(HeaderDirective::local(
                &class.name,
                self.relative_include(path),
            ));
        }

        if let Some((first, second)) = pair_arguments(&class.name) {
            self.resolve(first, headers);
            self.resolve(second, headers);
        }

        None
    }

    /// Strips the longest matching include root, then one leading separator.
    /// Paths under no include root are returned unchanged.
    #[must_use]
    pub fn relative_include<'p>(&self, path: &'p str) -> &'p str {
        let root = self
            .include_roots
            .iter()
            .filter(|root| !root.is_empty() && path.starts_with(root.as_str()))
            .max_by_key(|root| root.len());

        match root {
            Some(root) => {
                let rest = &path[root.len()..];
                rest.strip_prefix('/')
                    .or_else(|| rest.strip_prefix('\\'))
                    .unwrap_or(rest)
            }
            None => path,
        }
    }
}

fn add(headers: &mut HeaderSet, directive: HeaderDirective) {
    let text = directive.text.clone();
    if headers.insert(directive) {
        tracing::debug!("Added directive: {}", text);
    }
}

/// Returns the two template arguments of a `pair<A,B>` or `std::pair<A,B>`.
#[must_use]
pub fn pair_arguments(name: &str) -> Option<(&str, &str)> {
    let name = name.trim();
    let inner = name
        .strip_prefix("std::pair<")
        .or_else(|| name.strip_prefix("pair<"))?;
    let inner = inner.trim_end().strip_suffix('>')?;

    match split_template_args(inner).as_slice() {
        [first, second] => Some((*first, *second)),
        _ => None,
    }
}

/// Splits a template argument list at top-level commas.
#[must_use]
pub fn split_template_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = args[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }

    parts
}
