//! XML tree description parser.
//!
//! A tree description lists the classes the tree refers to and its branches,
//! leaves and sub-branches:
//!
//! ```xml
//! <tree name="events" title="Event data" file="events.root">
//!     <classes>
//!         <class name="Track" declFile="include/Track.h"/>
//!         <class name="vector&lt;Track&gt;" collection="vector" value="Track"/>
//!     </classes>
//!     <branch name="px">
//!         <leaf name="px" type="float"/>
//!     </branch>
//!     <branch name="tracks" class="vector&lt;Track&gt;"/>
//! </tree>
//! ```

use crate::classes::{ClassDef, ClassRegistry, CollectionKind};
use crate::error::ParseError;
use crate::types::{BranchDef, LeafDef, TreeDef};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use treesel_core::LeafKind;

/// Parses an XML tree description from a string.
///
/// # Arguments
/// * `xml` - XML tree description
///
/// # Returns
/// Parsed tree or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, has no `tree` element, or
/// contains invalid attribute values.
pub fn parse_tree(xml: &str) -> Result<TreeDef, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tree: Option<TreeDef> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "tree" if tree.is_none() => {
                        tree = Some(parse_tree_element(e)?);
                    }
                    "classes" => {
                        if let Some(tree) = tree.as_mut() {
                            parse_classes(&mut reader, &mut tree.classes)?;
                        }
                    }
                    "branch" => {
                        if let Some(tree) = tree.as_mut() {
                            let branch = parse_branch(&mut reader, e)?;
                            tree.add_branch(branch);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "tree" if tree.is_none() => {
                        tree = Some(parse_tree_element(e)?);
                    }
                    "branch" => {
                        if let Some(tree) = tree.as_mut() {
                            tree.add_branch(parse_branch_element(e)?);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    tree.ok_or_else(|| ParseError::InvalidStructure {
        message: "No tree element found".to_string(),
    })
}

/// Parses a tree description from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_tree_file(path: &std::path::Path) -> Result<TreeDef, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_tree(&xml)
}

/// Collects the unescaped attributes of an element.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw)?;
        pairs.push((key.to_string(), value.into_owned()));
    }

    Ok(pairs)
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

fn require_name(element: &str, name: String) -> Result<String, ParseError> {
    if name.is_empty() {
        return Err(ParseError::missing_attr(element, "name"));
    }
    Ok(name)
}

/// Parses the tree element attributes.
fn parse_tree_element(e: &BytesStart<'_>) -> Result<TreeDef, ParseError> {
    let mut name = String::new();
    let mut title = String::new();
    let mut file = None;
    let mut is_chain = false;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = value,
            "title" => title = value,
            "file" => file = Some(value),
            "chain" => is_chain = parse_bool("tree", "chain", &value)?,
            _ => {}
        }
    }

    let mut tree = TreeDef::new(require_name("tree", name)?).with_title(title);
    tree.file = file;
    tree.is_chain = is_chain;

    Ok(tree)
}

/// Parses the classes section.
fn parse_classes(
    reader: &mut Reader<&[u8]>,
    registry: &mut ClassRegistry,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "class" {
                    add_class(registry, parse_class(e)?)?;
                }
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "class" {
                    add_class(registry, parse_class(e)?)?;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn add_class(registry: &mut ClassRegistry, class: ClassDef) -> Result<(), ParseError> {
    let name = class.name.clone();
    if !registry.add_class(class) {
        return Err(ParseError::duplicate("class", name));
    }
    Ok(())
}

/// Parses a class definition.
fn parse_class(e: &BytesStart<'_>) -> Result<ClassDef, ParseError> {
    let mut name = String::new();
    let mut decl_file = None;
    let mut collection = None;
    let mut value_class = None;
    let mut is_clones = false;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = value,
            "declFile" => decl_file = Some(value),
            "collection" => {
                collection = Some(
                    CollectionKind::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr("class", "collection", &value))?,
                )
            }
            "value" => value_class = Some(value),
            "clones" => is_clones = parse_bool("class", "clones", &value)?,
            _ => {}
        }
    }

    Ok(ClassDef {
        name: require_name("class", name)?,
        decl_file,
        collection,
        value_class,
        is_clones,
    })
}

/// Parses the attributes of a branch element.
fn parse_branch_element(e: &BytesStart<'_>) -> Result<BranchDef, ParseError> {
    let mut name = String::new();
    let mut title = String::new();
    let mut class_name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = value,
            "title" => title = value,
            "class" => class_name = Some(value),
            _ => {}
        }
    }

    let mut branch = BranchDef::new(require_name("branch", name)?).with_title(title);
    branch.class_name = class_name;

    Ok(branch)
}

/// Parses a branch element with content: leaves and sub-branches.
fn parse_branch(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<BranchDef, ParseError> {
    let mut branch = parse_branch_element(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "branch" => {
                        let nested = parse_branch(reader, e)?;
                        branch.branches.push(nested);
                    }
                    "leaf" => {
                        branch.leaves.push(parse_leaf(e)?);
                        skip_to_end(reader)?;
                    }
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "branch" => branch.branches.push(parse_branch_element(e)?),
                    "leaf" => branch.leaves.push(parse_leaf(e)?),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(branch)
}

/// Parses a leaf definition.
fn parse_leaf(e: &BytesStart<'_>) -> Result<LeafDef, ParseError> {
    let mut name = String::new();
    let mut title = String::new();
    let mut type_name = String::new();
    let mut kind = LeafKind::Basic;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = value,
            "title" => title = value,
            "type" => type_name = value,
            "kind" => {
                kind = LeafKind::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("leaf", "kind", &value))?
            }
            _ => {}
        }
    }

    if type_name.is_empty() && kind != LeafKind::Object {
        return Err(ParseError::missing_attr("leaf", "type"));
    }

    Ok(LeafDef::new(require_name("leaf", name)?, type_name)
        .with_title(title)
        .with_kind(kind))
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::ClassCatalog;

    const EVENTS_TREE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tree name="events" title="Event data" file="events.root">
    <classes>
        <class name="string"/>
        <class name="Track" declFile="include/Track.h"/>
        <class name="vector&lt;Track&gt;" collection="vector" value="Track"/>
        <class name="map&lt;int,Track&gt;" collection="-4" value="pair&lt;const int,Track&gt;"/>
        <class name="pair&lt;const int,Track&gt;"/>
        <class name="TClonesArray" clones="true"/>
    </classes>
    <branch name="px">
        <leaf name="px" type="float" title="px/F"/>
    </branch>
    <branch name="hits">
        <leaf name="hits" type="int" title="hits[nhits]"/>
    </branch>
    <branch name="label">
        <leaf name="label" type="char" kind="char"/>
    </branch>
    <branch name="tracks" class="vector&lt;Track&gt;"/>
    <branch name="event" class="Event">
        <branch name="fX">
            <leaf name="fX" type="double"/>
        </branch>
        <branch name="fY">
            <leaf name="fY" type="double"/>
        </branch>
    </branch>
</tree>"#;

    #[test]
    fn test_parse_tree_attributes() {
        let tree = parse_tree(EVENTS_TREE).expect("Failed to parse tree");

        assert_eq!(tree.name, "events");
        assert_eq!(tree.title, "Event data");
        assert_eq!(tree.file.as_deref(), Some("events.root"));
        assert!(!tree.is_chain);
    }

    #[test]
    fn test_parse_classes() {
        let tree = parse_tree(EVENTS_TREE).expect("Failed to parse tree");

        assert_eq!(tree.classes.len(), 6);
        let track = tree.classes.class("Track").unwrap();
        assert_eq!(track.decl_file(), Some("include/Track.h"));

        let tracks = tree.classes.class("vector<Track>").unwrap();
        assert_eq!(tracks.collection, Some(CollectionKind::Vector));
        assert_eq!(tracks.value_class.as_deref(), Some("Track"));

        let map = tree.classes.class("map<int,Track>").unwrap();
        assert_eq!(map.collection, Some(CollectionKind::Map));

        assert!(tree.classes.class("TClonesArray").unwrap().is_clones);
    }

    #[test]
    fn test_parse_branches() {
        let tree = parse_tree(EVENTS_TREE).expect("Failed to parse tree");

        assert_eq!(tree.branches.len(), 5);

        let hits = tree.get_branch("hits").unwrap();
        assert_eq!(hits.leaves.len(), 1);
        assert_eq!(hits.leaves[0].title, "hits[nhits]");
        assert_eq!(hits.leaves[0].type_name, "int");

        let label = tree.get_branch("label").unwrap();
        assert_eq!(label.leaves[0].kind, LeafKind::CharArray);

        let tracks = tree.get_branch("tracks").unwrap();
        assert_eq!(tracks.class_name(), Some("vector<Track>"));
        assert!(tracks.leaves.is_empty());

        let event = tree.get_branch("event").unwrap();
        assert!(event.is_split());
        assert_eq!(event.branches.len(), 2);
        assert_eq!(event.branches[1].leaves[0].name, "fY");
    }

    #[test]
    fn test_missing_tree_element() {
        let result = parse_tree("<classes/>");
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_missing_branch_name() {
        let xml = r#"<tree name="t"><branch title="x"/></tree>"#;
        let result = parse_tree(xml);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_invalid_collection_kind() {
        let xml = r#"<tree name="t"><classes><class name="x" collection="array"/></classes></tree>"#;
        let result = parse_tree(xml);
        assert!(matches!(result, Err(ParseError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_duplicate_class() {
        let xml = r#"<tree name="t">
    <classes>
        <class name="Track"/>
        <class name="Track"/>
    </classes>
</tree>"#;
        let result = parse_tree(xml);
        assert!(matches!(result, Err(ParseError::DuplicateDefinition { .. })));
    }

    #[test]
    fn test_chain_flag() {
        let tree = parse_tree(r#"<tree name="t" chain="true"/>"#).expect("Failed to parse tree");
        assert!(tree.is_chain);
        assert!(tree.branches.is_empty());

        let result = parse_tree(r#"<tree name="t" chain="maybe"/>"#);
        assert!(matches!(result, Err(ParseError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_object_leaf_without_type() {
        let xml = r#"<tree name="t">
    <branch name="obj">
        <leaf name="obj" kind="object"/>
    </branch>
</tree>"#;
        let tree = parse_tree(xml).expect("Failed to parse tree");
        assert_eq!(tree.branches[0].leaves[0].kind, LeafKind::Object);
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = r#"<tree name="t">
    <comment>ignored <b>content</b></comment>
    <branch name="px">
        <note>also ignored</note>
        <leaf name="px" type="float"></leaf>
    </branch>
</tree>"#;
        let tree = parse_tree(xml).expect("Failed to parse tree");
        assert_eq!(tree.branches.len(), 1);
        assert_eq!(tree.branches[0].leaves.len(), 1);
    }
}
