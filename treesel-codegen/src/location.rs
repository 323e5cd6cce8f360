//! Container location of a composite branch's declared class.

use treesel_core::{LocationTag, ShapeIssue};
use treesel_schema::{ClassCatalog, ClassDef};

/// Result of classifying a class by container nesting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Location tag of the innermost container reached.
    pub tag: LocationTag,
    /// Outermost container class name, if the class is a container.
    pub container: Option<String>,
    /// Element class of the innermost generic container, if it holds one.
    pub element_class: Option<String>,
}

impl Location {
    /// Location of a class that is not a container.
    #[must_use]
    pub fn top_level() -> Self {
        Self::default()
    }
}

/// Classifies where a class sits relative to container nesting.
///
/// A container of containers is followed one extra level; a third level is
/// rejected.
///
/// # Errors
/// Returns `ShapeIssue::ContainerNestingTooDeep` for three or more levels of
/// containers.
pub fn classify_location<C: ClassCatalog + ?Sized>(
    catalog: &C,
    class: &ClassDef,
) -> Result<Location, ShapeIssue> {
    classify_at(catalog, class, 0)
}

fn is_container(class: &ClassDef) -> bool {
    class.is_clones || class.is_collection()
}

fn classify_at<C: ClassCatalog + ?Sized>(
    catalog: &C,
    class: &ClassDef,
    depth: usize,
) -> Result<Location, ShapeIssue> {
    if !is_container(class) {
        return Ok(Location::top_level());
    }
    if depth > 1 {
        return Err(ShapeIssue::ContainerNestingTooDeep);
    }
    let nested = depth > 0;

    if class.is_clones {
        // Element type only known from the branch content.
        let tag = if nested {
            LocationTag::NestedFixedContainerElement
        } else {
            LocationTag::FixedContainerElement
        };
        return Ok(Location {
            tag,
            container: Some(class.name.clone()),
            element_class: None,
        });
    }

    let tag = if nested {
        LocationTag::NestedGenericContainerElement
    } else {
        LocationTag::GenericContainerElement
    };

    let Some(value) = class.value_class.as_deref() else {
        return Ok(Location {
            tag,
            container: Some(class.name.clone()),
            element_class: None,
        });
    };

    match catalog.class(value) {
        Some(inner) if is_container(inner) => {
            let mut location = classify_at(catalog, inner, depth + 1)?;
            location.container = Some(class.name.clone());
            Ok(location)
        }
        Some(_) => Ok(Location {
            tag,
            container: Some(class.name.clone()),
            element_class: Some(value.to_string()),
        }),
        // `string` needs no dictionary entry; any other unknown element is
        // read like a raw element.
        None => Ok(Location {
            tag,
            container: Some(class.name.clone()),
            element_class: (value == "string").then(|| value.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treesel_schema::{ClassRegistry, CollectionKind};

    fn registry() -> ClassRegistry {
        ClassRegistry::new()
            .with_class(ClassDef::new("Track").with_decl_file("Track.h"))
            .with_class(ClassDef::clones_array())
            .with_class(ClassDef::collection(
                "vector<Track>",
                CollectionKind::Vector,
                Some("Track"),
            ))
            .with_class(ClassDef::collection(
                "vector<vector<Track> >",
                CollectionKind::Vector,
                Some("vector<Track>"),
            ))
            .with_class(ClassDef::collection(
                "list<vector<vector<Track> > >",
                CollectionKind::List,
                Some("vector<vector<Track> >"),
            ))
            .with_class(ClassDef::collection(
                "vector<TClonesArray>",
                CollectionKind::Vector,
                Some("TClonesArray"),
            ))
            .with_class(ClassDef::collection("vector<int>", CollectionKind::Vector, None))
    }

    fn classify(name: &str) -> Result<Location, ShapeIssue> {
        let registry = registry();
        let class = registry.class(name).unwrap().clone();
        classify_location(&registry, &class)
    }

    #[test]
    fn test_plain_class_is_top_level() {
        assert_eq!(classify("Track").unwrap(), Location::top_level());
    }

    #[test]
    fn test_clones_array() {
        let location = classify("TClonesArray").unwrap();
        assert_eq!(location.tag, LocationTag::FixedContainerElement);
        assert_eq!(location.container.as_deref(), Some("TClonesArray"));
        assert_eq!(location.element_class, None);
    }

    #[test]
    fn test_generic_container_unwraps_element() {
        let location = classify("vector<Track>").unwrap();
        assert_eq!(location.tag, LocationTag::GenericContainerElement);
        assert_eq!(location.container.as_deref(), Some("vector<Track>"));
        assert_eq!(location.element_class.as_deref(), Some("Track"));
    }

    #[test]
    fn test_container_of_container() {
        let location = classify("vector<vector<Track> >").unwrap();
        assert_eq!(location.tag, LocationTag::NestedGenericContainerElement);
        assert_eq!(location.container.as_deref(), Some("vector<vector<Track> >"));
        assert_eq!(location.element_class.as_deref(), Some("Track"));
    }

    #[test]
    fn test_clones_inside_container() {
        let location = classify("vector<TClonesArray>").unwrap();
        assert_eq!(location.tag, LocationTag::NestedFixedContainerElement);
        assert_eq!(location.element_class, None);
    }

    #[test]
    fn test_three_levels_rejected() {
        assert_eq!(
            classify("list<vector<vector<Track> > >"),
            Err(ShapeIssue::ContainerNestingTooDeep)
        );
    }

    #[test]
    fn test_raw_element() {
        let location = classify("vector<int>").unwrap();
        assert_eq!(location.tag, LocationTag::GenericContainerElement);
        assert_eq!(location.element_class, None);
    }

    #[test]
    fn test_element_class_not_in_catalog() {
        let registry = ClassRegistry::new();
        let class = ClassDef::collection("vector<string>", CollectionKind::Vector, Some("string"));
        let location = classify_location(&registry, &class).unwrap();
        assert_eq!(location.element_class.as_deref(), Some("string"));
    }

    #[test]
    fn test_unknown_element_class_has_no_element() {
        let registry = registry();
        let class = ClassDef::collection("vector<Foo>", CollectionKind::Vector, Some("Foo"));
        let location = classify_location(&registry, &class).unwrap();
        assert_eq!(location.tag, LocationTag::GenericContainerElement);
        assert_eq!(location.container.as_deref(), Some("vector<Foo>"));
        assert_eq!(location.element_class, None);
    }
}
